pub mod postgres_guest_repo;
pub mod postgres_invitation_repo;
pub mod postgres_kv_store;
pub mod postgres_user_repo;
pub mod sqlite_guest_repo;
pub mod sqlite_invitation_repo;
pub mod sqlite_kv_store;
pub mod sqlite_user_repo;
