pub mod profile_handler;

pub use profile_handler::{__path_get_profile, __path_update_profile, get_profile, update_profile};
