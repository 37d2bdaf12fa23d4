//! Question families built on strategic-form games.
//!
//! Each family lives in its own module and implements
//! [`QuestionType`](crate::question::QuestionType) so it can be registered
//! in a [`QuestionRegistry`](crate::question::QuestionRegistry).
//!
//! ## Available Families
//!
//! - [`nash`]: Pure Nash equilibria of two-player matrix games
//!
//! ## Adding New Families
//!
//! To add a new family:
//!
//! 1. Create a new module under `src/games/`
//! 2. Define the instance and answer types (both serializable)
//! 3. Implement the `QuestionType` trait
//! 4. Register it in `QuestionRegistry::with_defaults`
//!
//! See the [`nash`] module for a complete example.

pub mod nash;
