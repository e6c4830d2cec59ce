use serde::Deserialize;

use library_inventory::NewBook;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateBookRequest {
    pub id: String,
    pub title: String,
    pub author: String,
    pub quantity: u32,
}

impl From<CreateBookRequest> for NewBook {
    fn from(req: CreateBookRequest) -> Self {
        NewBook::new(req.id, req.title, req.author, req.quantity)
    }
}

/// `?id=` query used by the circulation endpoints.
#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}
