use dioxus::{prelude::*, signals::Signal};
use log::warn;

use hauling_calculator::{
    domain::{AppState, CalculatorEvent, ShipCatalog},
    infra::CatalogLoader,
    util::persistence::ConfigDirStore,
};

use crate::ui::{
    assets,
    components::toast::{push_toast, Toast, ToastKind, ToastMessage},
    pages::HaulingPage,
    shell::Shell,
};

#[component]
pub fn App() -> Element {
    let state = use_signal(|| AppState::restore(&ConfigDirStore::default()));
    use_context_provider(|| state);

    let toasts = use_signal(Vec::<ToastMessage>::new);
    use_context_provider(|| toasts);

    // One load per session; the page stays usable while it runs.
    let _catalog = use_future(move || async move { load_catalog(state, toasts).await });

    rsx! {
        document::Style { "{assets::main_css()}" }
        Shell { HaulingPage {} }
        Toast {}
    }
}

/// Runs the calculator pipeline for `event` and saves the snapshot.
pub fn dispatch_event(mut state: Signal<AppState>, event: CalculatorEvent) {
    let store = ConfigDirStore::default();
    state.with_mut(|st| {
        st.dispatch(event, &store);
    });
}

async fn load_catalog(state: Signal<AppState>, toasts: Signal<Vec<ToastMessage>>) {
    let catalog = match CatalogLoader::new() {
        Ok(loader) => loader.load().await,
        Err(err) => {
            warn!("[catalog] Failed to initialise catalog loader: {err}");
            ShipCatalog::default()
        }
    };

    if catalog.is_empty() {
        push_toast(
            toasts,
            ToastKind::Warning,
            "Ship list unavailable. Pick Custom or type the SCU yourself.",
        );
    }

    dispatch_event(state, CalculatorEvent::CatalogLoaded(catalog));
}
