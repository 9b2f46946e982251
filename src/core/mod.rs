//! # Navigation Core
//!
//! Reconciles a stack of browse pages against a display system that only
//! reports focus changes on a small pool of reusable slots.
//! It knows nothing about how pages are drawn or how media is played.
//!
//! ```text
//!   slot pool ──focus──▶ FocusQueue ──▶ NavigationController ──▶ Page
//!                                        │        ▲               (init/show/hide)
//!                                        ▼        │
//!                                  LocationHistory│
//!                                                 │
//!   content layer ── push_page / select_item ─────┘──▶ MediaSource::play
//! ```
//!
//! ## Modules
//!
//! - [`controller`]: `NavigationController`, owner of the stack and history
//! - [`event`]: the ordered, single-consumer focus event queue
//! - [`history`]: `LocationHistory`, one remembered choice per depth
//! - [`page`]: `Page`, lifecycle adapter around external page content
//! - [`config`]: layered settings for the binary

pub mod config;
pub mod controller;
pub mod event;
pub mod history;
pub mod page;

pub use controller::{NavError, NavSnapshot, NavigationController, PageSnapshot};
pub use event::{FocusEvent, FocusNotifier, FocusQueue};
pub use history::LocationHistory;
pub use page::Page;
