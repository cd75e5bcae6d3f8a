mod app;
mod components;
mod hooks;

const MOUNT_ELEMENT_ID: &str = "app";

fn mount_point() -> Option<web_sys::Element>
{
  web_sys::window()?
    .document()?
    .get_element_by_id(MOUNT_ELEMENT_ID)
}

fn main() {
  console_error_panic_hook::set_once();
  wasm_tracing::set_as_global_default();

  let Some(root) = mount_point() else {
    tracing::error!(
      id = MOUNT_ELEMENT_ID,
      "mount element not found; lifegrid \
       not started"
    );
    return;
  };

  tracing::info!("mounting lifegrid grid");
  yew::Renderer::<app::App>::with_root(root)
    .render();
}
