//! Domain layer - Diagram schema, validation and navigation rules

pub mod account;
pub mod diagram;
pub mod integrity;
pub mod routes;
pub mod validation;

pub use account::{AuthResponse, UserAbilityRules, UserData};
pub use diagram::{
    slug, CanvasState, DiagramConfiguration, DiagramSnapshot, Direction, ElementId,
    SavedComponent, SavedGroup, SCHEMA_VERSION,
};
pub use integrity::{check_integrity, IntegrityIssue};
pub use routes::{Access, Route, RouteTable};
pub use validation::{parse_configuration, validate_shape};
