//! # Beatedit Designer
//!
//! Playfield editing primitives for rhythm game beatmaps: the hit objects
//! placed on the playfield, the selection over them, and the interactive
//! transforms applied to that selection.
//!
//! ## Core Components
//!
//! ### Playfield Objects
//! - **Hit objects**: Circles, sliders and spinners behind the [`EditorShape`] trait
//! - **Slider paths**: Linear, bezier, Catmull-Rom and circular-arc segments
//! - **Shape store**: Ownership of every object under a stable id
//!
//! ### Editing
//! - **Selection**: Observable selection with id and rectangle picking
//! - **Scaling**: Drag-driven scale with playfield clamping and slider validation
//! - **Snapping**: Slider lengths quantized to a beat grid
//! - **History/Undo-Redo**: Snapshot based transactions
//!
//! ## Architecture
//!
//! ```text
//! ShapeStore (objects by id)
//!   └── SelectionManager ── notifies ──> ScaleHandler
//!                                          ├── SelectionTracker (capabilities)
//!                                          ├── ScaleOperation (snapshot)
//!                                          ├── clamp solver
//!                                          ├── ChangeHandler (UndoRedoManager)
//!                                          └── SnapProvider (BeatSnapProvider)
//! ```
//!
//! ## Usage
//!
//! ```
//! use beatedit_core::shared;
//! use beatedit_designer::{
//!     AdjustAxis, HitCircle, Point, ScaleHandler, SelectionManager, ShapeStore, UndoRedoManager,
//! };
//! use nalgebra::Vector2;
//!
//! let mut store = ShapeStore::new();
//! let a = store.add(HitCircle::new(Point::new(100.0, 100.0), 0.0));
//! let b = store.add(HitCircle::new(Point::new(200.0, 200.0), 250.0));
//!
//! let history = shared(UndoRedoManager::new(50));
//! let handler = shared(ScaleHandler::default().with_change_handler(history.clone()));
//!
//! let mut selection = SelectionManager::new();
//! selection.subscribe(&store, handler.clone());
//! selection.set_selection(&store, &[a, b]);
//!
//! handler.borrow_mut().begin(&store)?;
//! handler
//!     .borrow_mut()
//!     .update(&mut store, Vector2::new(2.0, 2.0), None, AdjustAxis::Both, 0.0)?;
//! handler.borrow_mut().commit(&store)?;
//!
//! assert!(history.borrow().can_undo());
//! # Ok::<(), beatedit_core::ScaleError>(())
//! ```

pub mod geometry;
pub mod history;
pub mod model;
pub mod scale;
pub mod selection_manager;
pub mod shape_store;
pub mod snap;

pub use geometry::{
    convex_hull, minimum_enclosing_circle, scaled_position, shapes_surrounding_quad,
    surrounding_quad, Quad,
};
pub use history::{ChangeHandler, UndoRedoManager};
pub use model::{
    EditorShape, HitCircle, HitObject, PathControlPoint, PathType, Point, ShapeType, Slider,
    SliderPath, Spinner,
};
pub use scale::{
    clamp_scale_to_adjust_axis, clamp_scale_to_bounds, AdjustAxis, OriginalState,
    ScaleCapabilities, ScaleHandler, ScaleOperation, SelectionTracker,
};
pub use selection_manager::{SelectionListener, SelectionManager};
pub use shape_store::ShapeStore;
pub use snap::{BeatSnapProvider, SnapProvider};
