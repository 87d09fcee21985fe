//! Pipeline stages for splitting a spell deck.
//!
//! Each submodule implements exactly one step, so each can be tested on its
//! own and the rendering backend can be swapped without touching the rest.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ deck ──▶ fields ──▶ reconcile ──▶ slug ──▶ assets ──▶ classify ──▶ collection
//! (path)   (lopdf)  (prefix)   (variant)     (name)   (pdfium)   (operator)   (spells.js)
//! ```
//!
//! 1. [`input`]      — validate the source path (exists, readable, `%PDF`)
//! 2. [`deck`]       — read each page's form widgets with lopdf
//! 3. [`fields`]     — find a field by name prefix, with parent fallback
//! 4. [`reconcile`]  — decide name-only vs. full card, parse the level
//! 5. [`slug`]       — derive the file name shared by all three assets
//! 6. [`assets`]     — render split PDF, WebP and PNG through [`render`]
//! 7. [`classify`]   — ask which classes can cast a full card's spell
//! 8. [`collection`] — splice the batch into `spells.js`

pub mod assets;
pub mod classify;
pub mod collection;
pub mod deck;
pub mod fields;
pub mod input;
pub mod reconcile;
pub mod render;
pub mod slug;
