//! Reactive hooks over browser layout state.

pub mod use_container_query;
pub mod use_responsive;

pub use use_container_query::{
    UseContainerQuery, use_container_aspect, use_container_dimensions, use_container_query,
    use_container_size_matches,
};
pub use use_responsive::{UseResponsive, use_responsive, use_responsive_context};
