use gloo::storage::errors::StorageError;
use gloo::storage::{SessionStorage, Storage};
use serde::Serialize;
use serde::de::DeserializeOwned;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct ModalProps {
    #[prop_or_default]
    pub children: Html,
}

/// Helper component to attatch the contents into the document.body instead of in the place where it's used.
#[function_component]
pub(crate) fn Modal(props: &ModalProps) -> Html {
    let modal_host = gloo::utils::body();
    create_portal(props.children.clone(), modal_host.into())
}

/// Types that live under a fixed key in browser storage.
pub(crate) trait StorageKey {
    const KEY: &'static str;
}

/// Per-tab storage: it survives reloads and bfcache round trips, and is gone
/// when the tab closes.
pub(crate) trait SessionLoad: Sized {
    fn session_load() -> Option<Self>;
}

impl<T: StorageKey + DeserializeOwned> SessionLoad for T {
    fn session_load() -> Option<Self> {
        match SessionStorage::get(T::KEY) {
            Ok(value) => Some(value),
            Err(StorageError::KeyNotFound(_)) => None,
            Err(err) => {
                log::warn!("discarding {}: {}", T::KEY, err);
                SessionStorage::delete(T::KEY);
                None
            }
        }
    }
}

pub(crate) trait SessionSave {
    fn session_save(&self);
}

impl<T: StorageKey + Serialize> SessionSave for T {
    fn session_save(&self) {
        if let Err(err) = SessionStorage::set(T::KEY, self) {
            log::error!("failed to save {}: {}", T::KEY, err);
        }
    }
}
