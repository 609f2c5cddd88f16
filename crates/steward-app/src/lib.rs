// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod board;
pub mod collection;
pub mod dashboard;
pub mod error;
pub mod filters;
pub mod forms;
pub mod ids;
pub mod model;
pub mod seed;
pub mod state;
pub mod upload;
pub mod view;

pub use board::*;
pub use collection::*;
pub use dashboard::*;
pub use error::*;
pub use filters::*;
pub use forms::*;
pub use ids::*;
pub use model::*;
pub use state::*;
pub use upload::*;
pub use view::*;
