pub mod app_config;
pub mod booking;
pub mod branches;
pub mod clock;
pub mod config;
pub mod content;
pub mod franchise;
pub mod media;
pub mod validation;

pub use app_config::{AppConfig, Environment, SheetsAuth, SheetsConfig, WebhookConfig};
pub use booking::{
    parse_date, slot_availability, validate_booking, BookingConfirmation, BookingDraft, BookingField,
    SlotAvailability, TimeSlot, BUSINESS_EMAIL, TIME_SLOTS,
};
pub use branches::{default_branches, load_branches, Branch, BranchesFile};
pub use clock::{Clock, FixedClock, ShopClock};
pub use config::{load_app_config, load_app_config_from_env};
pub use content::{
    ContentKey, GalleryContent, HeroContent, MediaItem, MediaKind, ServiceItem, ServicesContent,
    SiteContent,
};
pub use franchise::{validate_franchise, FranchiseField, FranchiseInquiry, INVESTMENT_RANGES};
pub use media::{is_valid_media_path, valid_media_src, MediaRenderer, MediaView};
pub use validation::FieldErrors;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read branches file {path}: {source}")]
    BranchesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse branches file: {0}")]
    BranchesFileParse(#[from] serde_yaml::Error),

    #[error("branch validation failed: {0}")]
    BranchValidation(String),
}
