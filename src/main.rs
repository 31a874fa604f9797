#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

mod app;
mod ui;

use dioxus::prelude::*;

#[cfg(feature = "desktop")]
use dioxus_desktop::{
    tao::{dpi::LogicalSize, window::WindowBuilder},
    Config as DesktopConfig,
};

use hauling_calculator::util::version::APP_NAME;

fn main() {
    #[cfg(feature = "desktop")]
    let builder = {
        // Blank webview on some Wayland drivers otherwise.
        if std::env::var_os("WAYLAND_DISPLAY").is_some()
            && std::env::var_os("WEBKIT_DISABLE_DMABUF_RENDERER").is_none()
        {
            std::env::set_var("WEBKIT_DISABLE_DMABUF_RENDERER", "1");
        }

        let window = WindowBuilder::new()
            .with_title(APP_NAME)
            .with_inner_size(LogicalSize::new(560.0, 820.0));
        LaunchBuilder::new().with_cfg(desktop! { DesktopConfig::new().with_window(window) })
    };

    #[cfg(not(feature = "desktop"))]
    let builder = LaunchBuilder::new();

    builder.launch(app::App);
}
