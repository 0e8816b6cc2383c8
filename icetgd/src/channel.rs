//! Channel directory: channel id to logical channel number (LCN).

use alloc::collections::BTreeMap;

use tracing::debug;

use crate::{Element, GuideError};

/// One `<channel>` entry of a guide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Channel {
    /// Channel id, referenced by programmes.
    pub id: String,

    /// Logical channel number, the number viewers tune to. Not necessarily
    /// numeric or unique. Empty if the guide has no `lcn` for the channel.
    pub lcn: String,

    /// Human readable channel name. Empty if missing.
    pub display_name: String,
}

impl Channel {
    /// Extract a channel from a `<channel>` element. Missing parts are empty.
    pub fn from_element(element: &Element) -> Channel {
        Channel {
            id: element.attr("id").unwrap_or_default().to_string(),
            lcn: element.find_text("lcn").unwrap_or_default().to_string(),
            display_name: element
                .find_text("display-name")
                .unwrap_or_default()
                .to_string(),
        }
    }
}

/// Lookup from channel id to [`Channel`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ChannelDirectory {
    channels: BTreeMap<String, Channel>,
}

impl ChannelDirectory {
    /// Create an empty directory.
    pub fn new() -> ChannelDirectory {
        ChannelDirectory {
            channels: BTreeMap::new(),
        }
    }

    /// Collect every `<channel>` child of the guide root.
    ///
    /// Ids are not validated. If an id repeats, the last channel wins.
    pub fn from_element(root: &Element) -> ChannelDirectory {
        let mut directory = ChannelDirectory::new();
        for element in root.find_all("channel") {
            directory.insert(Channel::from_element(element));
        }
        directory
    }

    /// Add a channel, returning any channel previously stored under its id.
    pub fn insert(&mut self, channel: Channel) -> Option<Channel> {
        let replaced = self.channels.insert(channel.id.clone(), channel);
        if let Some(ref old) = replaced {
            debug!("duplicate channel id {:?}, replacing {:?}", old.id, old);
        }
        replaced
    }

    /// Channel stored under `id`.
    pub fn get(&self, id: &str) -> Option<&Channel> {
        self.channels.get(id)
    }

    /// Logical channel number of channel `id`.
    ///
    /// A programme referencing a channel not in the guide is a broken guide,
    /// so this fails with [`GuideError::UnknownChannel`] instead of
    /// returning an `Option`.
    pub fn lookup_lcn(&self, id: &str) -> Result<&str, GuideError> {
        self.get(id)
            .map(|channel| channel.lcn.as_str())
            .ok_or_else(|| GuideError::UnknownChannel { id: id.to_string() })
    }

    /// Iterate over channels ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = &Channel> {
        self.channels.values()
    }

    /// Number of channels.
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// True if the directory holds no channels.
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}
