//! LRU backends.
//!
//! | Backend                        | Recency list                     |
//! |--------------------------------|----------------------------------|
//! | [`lru::LruCache`]              | sentinel list in a `SlotArena`   |
//! | [`linked_lru::LinkedLruCache`] | `hashlink::LinkedHashMap` order  |

pub mod linked_lru;
pub mod lru;
