//! Client core for the recados mural: fetches the board from the remote
//! endpoint, keeps it sorted, and builds the view model a rendering adapter
//! draws.

pub mod controller;
pub mod drag;
pub mod error;
pub mod sort;
pub mod transport;
pub mod view;

pub use controller::{
    validate_new_recado, ControllerOptions, LoadState, MuralController, MuralEvent, UiAction,
};
pub use drag::Point;
pub use error::{MuralError, RequiredField};
pub use sort::SortCriterion;
pub use transport::{HttpRecadosApi, RecadosApi};
pub use view::MuralView;
