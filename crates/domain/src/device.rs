//! Device — an entry in the catalog, composed of self-validating value
//! objects.
//!
//! A [`Device`] is built from untrusted flat primitives through
//! [`Device::from_primitives`], mutated through [`Device::update_fields`],
//! and flattened back with [`Device::to_primitives`]. Both validating
//! operations are all-or-nothing: every supplied field is checked first and
//! nothing is applied unless all of them pass.

pub mod brand;
pub mod created_at;
pub mod id;
pub mod name;
pub mod state;

use serde::{Deserialize, Serialize};

pub use brand::DeviceBrand;
pub use created_at::CreatedAt;
pub use id::DeviceId;
pub use name::DeviceName;
pub use state::DeviceState;

use crate::error::{DevKeepError, ValidationError};

/// Flat string rendering of a device, used at every storage and transport
/// boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevicePrimitives {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub state: String,
    pub created_at: String,
}

/// Partial flat record: input to [`Device::from_primitives`] and
/// [`Device::update_fields`].
///
/// `id` and `created_at` only matter on construction (reconstruction from
/// storage); [`Device::update_fields`] ignores them since both are
/// immutable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevicePatch {
    pub id: Option<String>,
    pub name: Option<String>,
    pub brand: Option<String>,
    pub state: Option<String>,
    pub created_at: Option<String>,
}

impl DevicePatch {
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    #[must_use]
    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    #[must_use]
    pub fn created_at(mut self, created_at: impl Into<String>) -> Self {
        self.created_at = Some(created_at.into());
        self
    }
}

impl From<DevicePrimitives> for DevicePatch {
    fn from(primitives: DevicePrimitives) -> Self {
        Self {
            id: Some(primitives.id),
            name: Some(primitives.name),
            brand: Some(primitives.brand),
            state: Some(primitives.state),
            created_at: Some(primitives.created_at),
        }
    }
}

/// A catalogued device.
///
/// `id` and `created_at` are fixed at construction; `name`, `brand` and
/// `state` change only through [`update_fields`](Self::update_fields),
/// which enforces the in-use guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    id: DeviceId,
    name: DeviceName,
    brand: DeviceBrand,
    state: DeviceState,
    created_at: CreatedAt,
}

impl Device {
    /// Build a device from untrusted primitives.
    ///
    /// `name`, `brand` and `state` are mandatory. `id` and `created_at` are
    /// taken verbatim when present (reconstruction from storage) and
    /// generated/defaulted to now otherwise. All field failures are
    /// gathered into a single error instead of stopping at the first.
    ///
    /// # Errors
    ///
    /// Returns [`DevKeepError::Validation`] describing every missing or
    /// invalid field.
    pub fn from_primitives(patch: DevicePatch) -> Result<Self, DevKeepError> {
        let mut errors = Vec::new();

        let id = match patch.id {
            Some(raw) => buffered(DeviceId::parse(raw), &mut errors),
            None => Some(DeviceId::new()),
        };
        let name = match patch.name {
            Some(raw) => buffered(DeviceName::new(raw), &mut errors),
            None => {
                errors.push(ValidationError::MissingField { field: "name" });
                None
            }
        };
        let brand = match patch.brand {
            Some(raw) => buffered(DeviceBrand::new(raw), &mut errors),
            None => {
                errors.push(ValidationError::MissingField { field: "brand" });
                None
            }
        };
        let state = match patch.state {
            Some(raw) => buffered(raw.parse::<DeviceState>(), &mut errors),
            None => {
                errors.push(ValidationError::MissingField { field: "state" });
                None
            }
        };
        let created_at = match patch.created_at {
            Some(raw) => buffered(CreatedAt::parse(&raw), &mut errors),
            None => Some(CreatedAt::now()),
        };

        if let Some(err) = ValidationError::collect(errors) {
            return Err(err.into());
        }
        let (Some(id), Some(name), Some(brand), Some(state), Some(created_at)) =
            (id, name, brand, state, created_at)
        else {
            unreachable!("every rejected field pushed an error");
        };
        Ok(Self {
            id,
            name,
            brand,
            state,
            created_at,
        })
    }

    /// Flatten into the five-string primitive record. Pure.
    #[must_use]
    pub fn to_primitives(&self) -> DevicePrimitives {
        DevicePrimitives {
            id: self.id.to_string(),
            name: self.name.to_string(),
            brand: self.brand.to_string(),
            state: self.state.to_string(),
            created_at: self.created_at.to_string(),
        }
    }

    /// Apply a partial update in place, atomically.
    ///
    /// While the device is in use a patch touching `name` or `brand` is
    /// rejected outright; a patch changing only `state` is allowed so the
    /// device can transition out of in-use. Every supplied field is
    /// validated before any of them is applied, so a single bad field
    /// leaves the entity untouched. `id` and `created_at` in the patch are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns [`DevKeepError::Validation`] on the in-use guard or on any
    /// invalid field.
    pub fn update_fields(&mut self, patch: DevicePatch) -> Result<(), DevKeepError> {
        if self.state.is_in_use() && (patch.name.is_some() || patch.brand.is_some()) {
            return Err(ValidationError::UpdateWhileInUse.into());
        }

        let mut errors = Vec::new();
        let name = patch
            .name
            .and_then(|raw| buffered(DeviceName::new(raw), &mut errors));
        let brand = patch
            .brand
            .and_then(|raw| buffered(DeviceBrand::new(raw), &mut errors));
        let state = patch
            .state
            .and_then(|raw| buffered(raw.parse::<DeviceState>(), &mut errors));

        if let Some(err) = ValidationError::collect(errors) {
            return Err(err.into());
        }
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(brand) = brand {
            self.brand = brand;
        }
        if let Some(state) = state {
            self.state = state;
        }
        Ok(())
    }

    /// Whether the device may be removed from the catalog.
    #[must_use]
    pub fn can_be_deleted(&self) -> bool {
        !self.state.is_in_use()
    }

    #[must_use]
    pub fn id(&self) -> &DeviceId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &DeviceName {
        &self.name
    }

    #[must_use]
    pub fn brand(&self) -> &DeviceBrand {
        &self.brand
    }

    #[must_use]
    pub fn state(&self) -> DeviceState {
        self.state
    }

    #[must_use]
    pub fn created_at(&self) -> CreatedAt {
        self.created_at
    }
}

fn buffered<T>(result: Result<T, ValidationError>, errors: &mut Vec<ValidationError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            errors.push(err);
            None
        }
    }
}
