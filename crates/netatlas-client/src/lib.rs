//! Клиент API инвентаря NetAtlas и контроллер канвы.
//!
//! [`TopologyClient`] покрывает wire-контракт сервера один-в-один;
//! [`CanvasController`] держит точечную копию графа (единственный источник
//! истины — хранилище) и сверяет с ним жесты пользователя.

pub mod client;
pub mod controller;
pub mod error;
pub mod layout;
pub mod notify;
pub mod types;
pub mod viewport;

pub use client::TopologyClient;
pub use controller::{CanvasController, Selection};
pub use error::Error;
