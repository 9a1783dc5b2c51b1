//! Zone dropdown backed by a lookup table.

use cfpanel_core::Zone;
use serde::Serialize;

/// Label of the dropdown's empty option
pub const ZONE_PLACEHOLDER: &str = "-- select zone --";

/// Opaque handle to one option of a [`ZoneTable`].
///
/// Keys are only valid for the table load that minted them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ZoneKey {
    generation: u64,
    index: usize,
}

/// A selectable zone
#[derive(Debug, Clone, Serialize)]
pub struct ZoneOption {
    /// Selection handle
    pub key: ZoneKey,

    /// The zone it resolves to
    pub zone: Zone,
}

/// One rendered dropdown entry; the placeholder has no key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectOption<'a> {
    /// Selection handle, `None` for the placeholder
    pub key: Option<ZoneKey>,

    /// Text shown to the user
    pub label: &'a str,
}

/// The zones of the most recent successful load
#[derive(Debug, Clone, Default, Serialize)]
pub struct ZoneTable {
    generation: u64,
    options: Vec<ZoneOption>,
}

impl ZoneTable {
    /// Replace every option, invalidating keys from earlier loads
    pub fn replace(&mut self, zones: Vec<Zone>) {
        self.generation += 1;
        let generation = self.generation;
        self.options = zones
            .into_iter()
            .enumerate()
            .map(|(index, zone)| ZoneOption {
                key: ZoneKey { generation, index },
                zone,
            })
            .collect();
    }

    /// Look up the zone behind a key
    #[must_use]
    pub fn resolve(&self, key: ZoneKey) -> Option<&Zone> {
        if key.generation != self.generation {
            return None;
        }
        self.options.get(key.index).map(|option| &option.zone)
    }

    /// Find a zone by name or id
    #[must_use]
    pub fn find(&self, needle: &str) -> Option<ZoneKey> {
        self.options
            .iter()
            .find(|o| o.zone.name == needle || o.zone.id == needle)
            .map(|o| o.key)
    }

    /// Dropdown entries: the placeholder, then one per zone
    #[must_use]
    pub fn options(&self) -> Vec<SelectOption<'_>> {
        std::iter::once(SelectOption {
            key: None,
            label: ZONE_PLACEHOLDER,
        })
        .chain(self.options.iter().map(|o| SelectOption {
            key: Some(o.key),
            label: o.zone.name.as_str(),
        }))
        .collect()
    }

    /// Selectable zones, without the placeholder
    #[must_use]
    pub fn zones(&self) -> &[ZoneOption] {
        &self.options
    }

    /// Number of selectable zones
    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Returns true if no zones are loaded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}
