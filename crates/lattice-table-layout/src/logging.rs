//! Tracing targets used by the table layout manager.
//!
//! The crate instruments itself with the `tracing` crate. To see the output,
//! install a subscriber in the host application and filter by target:
//!
//! ```ignore
//! use tracing_subscriber::EnvFilter;
//!
//! tracing_subscriber::fmt()
//!     .with_env_filter(EnvFilter::new("lattice_table_layout::selection=trace"))
//!     .init();
//! ```

/// Target names for log filtering.
pub mod targets {
    /// Source attachment and capability probing.
    pub const SOURCE: &str = "lattice_table_layout::source";
    /// Linear/grid coordinate translation.
    pub const INDEX: &str = "lattice_table_layout::index";
    /// Selection routing.
    pub const SELECTION: &str = "lattice_table_layout::selection";
}
