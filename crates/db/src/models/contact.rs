//! Contact message model and DTO. Append-only: the table has no update
//! or delete path.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use folio_core::types::{DbId, Timestamp};

/// A contact-form submission row from the `contact_messages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContactMessage {
    pub id: DbId,
    pub fname: String,
    pub lname: String,
    pub email: String,
    pub message: String,
    pub created_at: Timestamp,
}

/// DTO for submitting a contact message.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateContactMessage {
    pub fname: String,
    pub lname: String,
    pub email: String,
    pub message: String,
}
