//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument. Methods that must run
//! inside a caller-owned transaction take `&mut PgConnection` instead.

pub mod image_repo;
pub mod office_repo;
pub mod reservation_repo;
pub mod tag_repo;
pub mod user_repo;

pub use image_repo::ImageRepo;
pub use office_repo::OfficeRepo;
pub use reservation_repo::ReservationRepo;
pub use tag_repo::TagRepo;
pub use user_repo::UserRepo;
