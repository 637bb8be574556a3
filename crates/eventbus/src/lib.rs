//! # keyward-eventbus
//!
//! Page-wide change propagation for keyward forms.
//!
//! Every mounted form publishes its field edits on one shared [`EventBus`].
//! Each event carries the [`ScopeToken`] of the editor instance that owns
//! the form, and subscribers act only on events bearing their own token.
//! That filtering is what keeps two editors open at the same time from
//! observing each other's edits.
//!
//! Delivery is synchronous: [`EventBus::emit`] returns after every live
//! subscriber has run, so notifications reach hosts in edit order.
//! Subscriptions are RAII guards; dropping one detaches the handler.
//!
//! ```rust,ignore
//! use keyward_eventbus::{EventBus, ScopeToken, Scoped};
//!
//! let bus = EventBus::<MyEvent>::new();
//! let mine = ScopeToken::allocate();
//! let _sub = bus.subscribe({
//!     let mine = mine.clone();
//!     move |event: &MyEvent| {
//!         if event.is_in(&mine) {
//!             // react
//!         }
//!     }
//! });
//! ```

mod bus;
mod scope;

pub use bus::{EventBus, Subscription};
pub use scope::{ScopeToken, Scoped};
