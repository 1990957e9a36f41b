//! # Presentation Layer
//!
//! This module implements the **User Interface** logic for the CLI.
//! It follows an adaptation of the **MVVM (Model-View-ViewModel)** pattern to
//! keep the derivation logic (`caretrace_engine`) apart from the output logic.
//!
//! ## Architecture & Data Flow
//!
//! The data flow is strictly unidirectional:
//!
//! ```text
//! [ Handler ] --> [ Presenter ] --> [ ViewModel ] --> [ Renderer ] --> [ Output ]
//!  (Controller)    (Converter)       (Contract)        (View)        (Console/JSON)
//! ```
//!
//! ## Directory Guide
//!
//! ### 1. `view_models/` (The Data Contract)
//! * **What:** Structs that define *what* the user sees. Every command prints
//!   `{ "badge"?, "content", "suggestions"? }` in JSON mode.
//! * **Rule:** Pure data containers implementing `Serialize`. Domain enums are
//!   flattened to strings (`"finish"`, `"high"`), so the JSON contract does not
//!   move when an engine type does.
//!
//! ### 2. `presenters/` (The Transformation Logic)
//! * **What:** Pure functions turning engine output into view models.
//! * **Rule:** Badge choice, suggestions, timestamp localisation and agent
//!   filtering happen here and nowhere else.
//!
//! ### 3. `views/` (The Text Layout)
//! * **What:** `CreateView` implementations: one `fmt::Display` per view model
//!   and `ViewMode`.
//!
//! ### 4. `renderers/` (The Output Strategy)
//! * **What:** The driver that takes a `CommandResultViewModel` and paints it.
//! * **Components:**
//!     * `console.rs`: stdout rendering, JSON or text, colour only on a terminal.
//!     * `traits.rs`: the `Renderer` interface used by handlers.
//!
//! ### 5. `formatters/` (The Utilities)
//! * **What:** Small helpers shared by presenters and views (timestamps, text).
//!
//! ## Decision Matrix
//!
//! | If you need to... | Go to... |
//! |-------------------|----------|
//! | Add a field to the JSON output | **`view_models/`** |
//! | Change when a warning badge appears | **`presenters/`** |
//! | Change the colour of a stage marker | **`views/`** |
//! | Change how timestamps read | **`formatters/`** |

pub mod formatters;
pub mod presenters;
pub mod renderers;
pub mod view_models;
mod views;

pub use renderers::{ConsoleRenderer, Renderer};
pub use view_models::{
    CommandResultViewModel, CreateView, Guidance, OutputFormat, StatusBadge, StatusLevel,
    ViewMode,
};
