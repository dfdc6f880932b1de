//! Request DTOs
//!
//! Data structures for API request bodies and query strings.

use serde::Deserialize;
use validator::Validate;

use crate::application::services::CityFormDto;

/// City create/update form, decoded from a multipart body.
#[derive(Debug, Default, Validate)]
pub struct CityForm {
    pub id: Option<i64>,

    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: Option<String>,

    /// Sent as the `country` field
    pub country_id: Option<i64>,

    pub logo: Option<LogoUpload>,
}

/// An uploaded logo file
#[derive(Default)]
pub struct LogoUpload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for LogoUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogoUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl From<CityForm> for CityFormDto {
    fn from(form: CityForm) -> Self {
        Self {
            id: form.id,
            name: form.name,
            country_id: form.country_id,
            logo: form.logo.map(|logo| logo.bytes),
        }
    }
}

/// Paging query for the city listing.
///
/// `sort` may repeat: `?sort=name,desc&sort=id`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityPageParams {
    pub page: Option<u32>,
    pub size: Option<u32>,
    #[serde(default)]
    pub sort: Vec<String>,
    pub country_id: Option<i64>,
}

/// Search cities by name
#[derive(Debug, Deserialize)]
pub struct SearchByNameParams {
    pub name: String,
}

/// Search cities by country name
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchByCountryNameParams {
    pub country_name: String,
}
