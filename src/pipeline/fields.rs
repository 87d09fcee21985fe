//! Form-field lookup by name prefix.
//!
//! Card templates name their fields `Name_`, `School_`, `Level_` and
//! `PName_`, but form generators append disambiguators (`Name_F00`,
//! `Level_3xq`), so fields are matched by prefix. Widgets that belong to a
//! shared field carry no name of their own; their name and value live on the
//! parent field one level up.
//!
//! The resolver only sees the [`FormEntry`] capability so it works the same
//! over lopdf annotations ([`crate::pipeline::deck`]) and plain
//! [`FieldEntry`] values.

/// One widget/field entry on a page, as the resolver needs to see it.
pub trait FormEntry {
    /// The entry's own partial name (`/T`), if any.
    fn own_name(&self) -> Option<String>;

    /// Whether the entry has a parent field.
    fn has_parent(&self) -> bool;

    /// The parent field's name, if there is a parent and it is named.
    fn parent_name(&self) -> Option<String>;

    /// The entry's own value (`/V`), if any.
    fn own_value(&self) -> Option<String>;

    /// The parent field's value, if there is a parent and it has one.
    fn parent_value(&self) -> Option<String>;
}

/// Return the trimmed value of the first entry whose name starts with `prefix`.
///
/// The entry's name is its own name, or its parent's when its own is empty.
/// An empty own value falls back to the parent's value. A matching entry
/// with no value at all does not stop the scan.
pub fn resolve_field<E: FormEntry>(entries: &[E], prefix: &str) -> Option<String> {
    entries.iter().find_map(|entry| {
        let name = entry
            .own_name()
            .filter(|n| !n.is_empty())
            .or_else(|| entry.parent_name())?;
        if !name.starts_with(prefix) {
            return None;
        }

        let own = entry.own_value();
        let value = if own.as_deref().is_none_or(str::is_empty) && entry.has_parent() {
            entry.parent_value()
        } else {
            own
        };
        value.map(|v| v.trim().to_string())
    })
}

/// A detached field entry, for backends that materialise fields up front.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldEntry {
    pub name: Option<String>,
    pub value: Option<String>,
    pub parent: Option<ParentField>,
}

/// The parent field of a [`FieldEntry`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParentField {
    pub name: Option<String>,
    pub value: Option<String>,
}

impl FieldEntry {
    /// A named field with a value.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            value: Some(value.into()),
            parent: None,
        }
    }

    /// An unnamed widget whose name and value sit on its parent field.
    pub fn widget_of(parent_name: impl Into<String>, parent_value: Option<&str>) -> Self {
        Self {
            name: None,
            value: None,
            parent: Some(ParentField {
                name: Some(parent_name.into()),
                value: parent_value.map(str::to_string),
            }),
        }
    }
}

impl FormEntry for FieldEntry {
    fn own_name(&self) -> Option<String> {
        self.name.clone()
    }

    fn has_parent(&self) -> bool {
        self.parent.is_some()
    }

    fn parent_name(&self) -> Option<String> {
        self.parent.as_ref().and_then(|p| p.name.clone())
    }

    fn own_value(&self) -> Option<String> {
        self.value.clone()
    }

    fn parent_value(&self) -> Option<String> {
        self.parent.as_ref().and_then(|p| p.value.clone())
    }
}
