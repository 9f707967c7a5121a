use yew::prelude::*;

use crate::utils::Modal;

#[derive(Properties, PartialEq)]
pub(crate) struct AboutProps {
    #[prop_or_default]
    pub open: bool,
    pub duration_secs: u64,
    pub on_close: Callback<()>,
}

#[function_component]
pub(crate) fn AboutView(props: &AboutProps) -> Html {
    let on_close = props.on_close.reform(|_: MouseEvent| ());

    html! {
        <Modal>
            <dialog id="about" open={props.open}>
                <article>
                    <h2>{"About Time Fighter"}</h2>
                    <p>
                        {format!(
                            "Tap the button as many times as you can in {} seconds. \
                             The clock starts with your first tap.",
                            props.duration_secs,
                        )}
                    </p>
                    <footer>
                        <button onclick={on_close}>{"OK"}</button>
                    </footer>
                </article>
            </dialog>
        </Modal>
    }
}
