//! Google Sheets integration: the CMS reader behind `/api/cms` and the
//! spreadsheet webhook that records booking and franchise submissions.

pub mod client;
pub mod cms;
pub mod error;
pub(crate) mod retry;
pub mod webhook;

pub use client::SheetsClient;
pub use cms::{CmsRanges, CmsSheetValues, CMS_RANGES};
pub use error::SheetsError;
pub use webhook::{encode_body, Submission, WebhookClient};
