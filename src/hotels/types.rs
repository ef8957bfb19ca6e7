//! Types for hotels and their images

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::Id;

/// An image attached to a hotel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelImage {
    pub id: Id,
    #[serde(alias = "image_url")]
    pub url: String,
    #[serde(default)]
    pub is_cover: bool,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default)]
    pub caption: Option<String>,
}

/// A hotel listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub star_rating: Option<u8>,
    pub price_per_night: f64,
    pub currency: String,
    #[serde(default)]
    pub room_count: Option<u32>,
    #[serde(default)]
    pub available_rooms: Option<u32>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub images: Vec<HotelImage>,
    #[serde(default = "default_true")]
    pub is_available: bool,
    #[serde(default)]
    pub is_featured: bool,
}

fn default_true() -> bool {
    true
}

impl Hotel {
    /// Nightly price together with its currency
    pub fn price(&self) -> Money {
        Money::new(self.price_per_night, &self.currency)
    }

    /// Images in display order
    pub fn ordered_images(&self) -> Vec<&HotelImage> {
        let mut images: Vec<&HotelImage> = self.images.iter().collect();
        images.sort_by_key(|image| image.sort_order);
        images
    }

    /// The single cover image: the first flagged one in display order, or
    /// the first image when none is flagged
    pub fn cover_image(&self) -> Option<&HotelImage> {
        let ordered = self.ordered_images();
        ordered
            .iter()
            .find(|image| image.is_cover)
            .or_else(|| ordered.first())
            .copied()
    }

    /// "City, State, Country" with missing parts skipped
    pub fn location(&self) -> String {
        [&self.city, &self.state, &self.country]
            .iter()
            .filter_map(|part| part.as_deref())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Public hotel search filters
#[derive(Debug, Clone, Default, Serialize)]
pub struct HotelSearchParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_in: Option<chrono::NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_out: Option<chrono::NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guests: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rooms: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub star_rating: Option<u8>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub amenities: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(rename = "perPage", skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

/// Admin hotel list filters
#[derive(Debug, Clone, Default, Serialize)]
pub struct HotelQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(rename = "perPage", skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

/// Admin create/edit form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelForm {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub address: String,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub star_rating: Option<u8>,
    pub price_per_night: f64,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_count: Option<u32>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    pub is_available: bool,
    pub is_featured: bool,
}

/// New hotels are bookable but not featured
impl Default for HotelForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: None,
            address: String::new(),
            city: String::new(),
            state: None,
            country: String::new(),
            star_rating: None,
            price_per_night: 0.0,
            currency: String::new(),
            room_count: None,
            amenities: Vec::new(),
            features: Vec::new(),
            is_available: true,
            is_featured: false,
        }
    }
}

impl HotelForm {
    pub fn from_hotel(hotel: &Hotel) -> Self {
        Self {
            name: hotel.name.clone(),
            description: hotel.description.clone(),
            address: hotel.address.clone().unwrap_or_default(),
            city: hotel.city.clone().unwrap_or_default(),
            state: hotel.state.clone(),
            country: hotel.country.clone().unwrap_or_default(),
            star_rating: hotel.star_rating,
            price_per_night: hotel.price_per_night,
            currency: hotel.currency.clone(),
            room_count: hotel.room_count,
            amenities: hotel.amenities.clone(),
            features: hotel.features.clone(),
            is_available: hotel.is_available,
            is_featured: hotel.is_featured,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ImageFromUrl<'a> {
    pub url: &'a str,
    pub is_cover: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub(crate) struct HotelFlags {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
}
