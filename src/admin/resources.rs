//! The collections with admin screens, and their screen-specific actions

use async_trait::async_trait;
use log::{error, info};

use crate::drivers::{Driver, DriverForm, DriverQuery, DriversApi};
use crate::error::{Error, Result};
use crate::hotels::{Hotel, HotelForm, HotelQuery, HotelsApi};
use crate::notifications::{Channel, NotificationTemplate, NotificationsApi, TemplateForm, TemplateQuery};
use crate::types::{BulkDeleteResult, Id};
use crate::users::{User, UserForm, UserQuery, UsersApi};

use super::{keys, require, ManagedResource, ModalMode, ResourcePermissions, ResourceScreen};

#[async_trait]
impl ManagedResource for DriversApi {
    type Item = Driver;
    type Form = DriverForm;
    type Query = DriverQuery;

    fn label(&self) -> &'static str {
        "driver"
    }

    fn permissions(&self) -> ResourcePermissions {
        ResourcePermissions {
            view: keys::DRIVERS_VIEW,
            create: keys::DRIVERS_CREATE,
            edit: keys::DRIVERS_EDIT,
            delete: keys::DRIVERS_DELETE,
        }
    }

    fn id(item: &Driver) -> Id {
        item.id
    }

    fn form_for(item: &Driver) -> DriverForm {
        DriverForm::from_driver(item)
    }

    fn validate(form: &DriverForm, _mode: ModalMode) -> Result<()> {
        require(&[&form.name, &form.email, &form.phone, &form.license_number])
    }

    async fn list(&self, query: &DriverQuery) -> Result<Vec<Driver>> {
        DriversApi::list(self, query).await
    }

    async fn create(&self, form: &DriverForm) -> Result<Driver> {
        DriversApi::create(self, form).await
    }

    async fn update(&self, id: Id, form: &DriverForm) -> Result<Driver> {
        DriversApi::update(self, id, form).await
    }

    async fn delete(&self, id: Id) -> Result<()> {
        DriversApi::delete(self, id).await
    }

    async fn bulk_delete(&self, ids: &[Id]) -> Result<BulkDeleteResult> {
        DriversApi::bulk_delete(self, ids).await
    }
}

impl ResourceScreen<DriversApi> {
    /// Flip a listed driver's availability, then reload
    pub async fn toggle_availability(&self, id: Id) -> Result<Driver> {
        let driver = self
            .find(id)
            .ok_or_else(|| Error::validation("The driver is no longer listed"))?;
        let available = !driver.is_available;

        let updated = self
            .resource
            .set_availability(id, available)
            .await
            .map_err(|e| {
                error!("Changing availability of driver {} failed: {}", id, e);
                e
            })?;
        info!("Driver {} is now {}", id, if available { "available" } else { "unavailable" });
        self.reload().await;
        Ok(updated)
    }
}

#[async_trait]
impl ManagedResource for HotelsApi {
    type Item = Hotel;
    type Form = HotelForm;
    type Query = HotelQuery;

    fn label(&self) -> &'static str {
        "hotel"
    }

    fn permissions(&self) -> ResourcePermissions {
        ResourcePermissions {
            view: keys::HOTELS_VIEW,
            create: keys::HOTELS_CREATE,
            edit: keys::HOTELS_EDIT,
            delete: keys::HOTELS_DELETE,
        }
    }

    fn id(item: &Hotel) -> Id {
        item.id
    }

    fn form_for(item: &Hotel) -> HotelForm {
        HotelForm::from_hotel(item)
    }

    fn validate(form: &HotelForm, _mode: ModalMode) -> Result<()> {
        require(&[&form.name, &form.address, &form.city, &form.country, &form.currency])?;
        if !form.price_per_night.is_finite() || form.price_per_night <= 0.0 {
            return Err(Error::validation("Price per night must be greater than zero"));
        }
        Ok(())
    }

    async fn list(&self, query: &HotelQuery) -> Result<Vec<Hotel>> {
        Ok(HotelsApi::list(self, query).await?.items)
    }

    async fn create(&self, form: &HotelForm) -> Result<Hotel> {
        HotelsApi::create(self, form).await
    }

    async fn update(&self, id: Id, form: &HotelForm) -> Result<Hotel> {
        HotelsApi::update(self, id, form).await
    }

    async fn delete(&self, id: Id) -> Result<()> {
        HotelsApi::delete(self, id).await
    }

    async fn bulk_delete(&self, ids: &[Id]) -> Result<BulkDeleteResult> {
        HotelsApi::bulk_delete(self, ids).await
    }
}

impl ResourceScreen<HotelsApi> {
    pub async fn toggle_featured(&self, id: Id) -> Result<Hotel> {
        let hotel = self
            .find(id)
            .ok_or_else(|| Error::validation("The hotel is no longer listed"))?;
        let updated = self
            .resource
            .set_featured(id, !hotel.is_featured)
            .await
            .map_err(|e| {
                error!("Changing featured flag of hotel {} failed: {}", id, e);
                e
            })?;
        self.reload().await;
        Ok(updated)
    }
}

#[async_trait]
impl ManagedResource for UsersApi {
    type Item = User;
    type Form = UserForm;
    type Query = UserQuery;

    fn label(&self) -> &'static str {
        "user"
    }

    fn permissions(&self) -> ResourcePermissions {
        ResourcePermissions {
            view: keys::USERS_VIEW,
            create: keys::USERS_CREATE,
            edit: keys::USERS_EDIT,
            delete: keys::USERS_DELETE,
        }
    }

    fn id(item: &User) -> Id {
        item.id
    }

    fn form_for(item: &User) -> UserForm {
        UserForm::from_user(item)
    }

    fn validate(form: &UserForm, mode: ModalMode) -> Result<()> {
        require(&[&form.first_name, &form.last_name, &form.email])?;
        if !form.email.contains('@') {
            return Err(Error::validation("Please enter a valid email address"));
        }
        let password = form.password.as_deref().unwrap_or_default();
        if mode == ModalMode::Add && password.trim().is_empty() {
            return Err(Error::validation("A password is required for new users"));
        }
        Ok(())
    }

    async fn list(&self, query: &UserQuery) -> Result<Vec<User>> {
        Ok(UsersApi::list(self, query).await?.items)
    }

    async fn create(&self, form: &UserForm) -> Result<User> {
        UsersApi::create(self, form).await
    }

    async fn update(&self, id: Id, form: &UserForm) -> Result<User> {
        UsersApi::update(self, id, form).await
    }

    async fn delete(&self, id: Id) -> Result<()> {
        UsersApi::delete(self, id).await
    }

    async fn bulk_delete(&self, ids: &[Id]) -> Result<BulkDeleteResult> {
        UsersApi::bulk_delete(self, ids).await
    }
}

#[async_trait]
impl ManagedResource for NotificationsApi {
    type Item = NotificationTemplate;
    type Form = TemplateForm;
    type Query = TemplateQuery;

    fn label(&self) -> &'static str {
        "template"
    }

    fn permissions(&self) -> ResourcePermissions {
        ResourcePermissions {
            view: keys::NOTIFICATIONS_VIEW,
            create: keys::NOTIFICATIONS_CREATE,
            edit: keys::NOTIFICATIONS_EDIT,
            delete: keys::NOTIFICATIONS_DELETE,
        }
    }

    fn id(item: &NotificationTemplate) -> Id {
        item.id
    }

    fn form_for(item: &NotificationTemplate) -> TemplateForm {
        TemplateForm::from_template(item)
    }

    fn validate(form: &TemplateForm, _mode: ModalMode) -> Result<()> {
        require(&[&form.name, &form.event, &form.content])?;
        let subject = form.subject.as_deref().unwrap_or_default();
        if form.channel == Channel::Email && subject.trim().is_empty() {
            return Err(Error::validation("Email templates need a subject"));
        }
        Ok(())
    }

    async fn list(&self, query: &TemplateQuery) -> Result<Vec<NotificationTemplate>> {
        self.templates(query).await
    }

    async fn create(&self, form: &TemplateForm) -> Result<NotificationTemplate> {
        self.create_template(form).await
    }

    async fn update(&self, id: Id, form: &TemplateForm) -> Result<NotificationTemplate> {
        self.update_template(id, form).await
    }

    async fn delete(&self, id: Id) -> Result<()> {
        self.delete_template(id).await
    }

    async fn bulk_delete(&self, ids: &[Id]) -> Result<BulkDeleteResult> {
        self.bulk_delete_templates(ids).await
    }
}

impl ResourceScreen<NotificationsApi> {
    /// Enable or disable a listed template, then reload
    pub async fn toggle_active(&self, id: Id) -> Result<NotificationTemplate> {
        let template = self
            .find(id)
            .ok_or_else(|| Error::validation("The template is no longer listed"))?;
        let updated = self
            .resource
            .toggle_template(id, !template.is_active)
            .await
            .map_err(|e| {
                error!("Toggling template {} failed: {}", id, e);
                e
            })?;
        self.reload().await;
        Ok(updated)
    }
}
