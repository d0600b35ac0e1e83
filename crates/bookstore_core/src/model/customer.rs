//! Customer records: delivery cities and clients.

use serde::{Deserialize, Serialize};

pub type CityId = i64;
pub type ClientId = i64;

/// Max stored length of `City::name`, in characters.
pub const CITY_NAME_MAX_CHARS: usize = 64;
/// Max stored length of `Client::name`, in characters.
pub const CLIENT_NAME_MAX_CHARS: usize = 64;

/// A delivery destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub id: CityId,
    pub name: String,
    /// Days needed to deliver an order to this city. Never negative.
    pub delivery_days: i64,
}

/// Insert payload for [`City`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCity {
    pub name: String,
    pub delivery_days: i64,
}

impl NewCity {
    pub fn new(name: impl Into<String>, delivery_days: i64) -> Self {
        Self {
            name: name.into(),
            delivery_days,
        }
    }
}

/// A customer placing purchases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    /// Unique across all clients.
    pub email: String,
    /// `None` once the client's city has been deleted.
    pub city_id: Option<CityId>,
}

/// Insert payload for [`Client`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewClient {
    pub name: String,
    pub email: String,
    pub city_id: Option<CityId>,
}

impl NewClient {
    pub fn new(name: impl Into<String>, email: impl Into<String>, city_id: Option<CityId>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            city_id,
        }
    }
}
