#![cfg(target_arch = "wasm32")]

use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SidebarProps {
    pub title: AttrValue,
    #[prop_or_default]
    pub children: Html,
}

/// Collapsible navigation column; the title is hidden while collapsed.
#[function_component(Sidebar)]
pub fn sidebar(props: &SidebarProps) -> Html {
    let collapsed = use_state(|| false);

    let on_toggle = {
        let collapsed = collapsed.clone();
        Callback::from(move |_: MouseEvent| collapsed.set(!*collapsed))
    };

    html! {
        <nav id="sidebar" class={classes!("sidebar", (*collapsed).then_some("collapsed"))}>
            <button
                id="toggle-btn"
                type="button"
                aria-label="Toggle sidebar"
                aria-expanded={(!*collapsed).to_string()}
                onclick={on_toggle}
            >
                {"☰"}
            </button>
            if !*collapsed {
                <span id="sidebar-title">{ props.title.clone() }</span>
            }
            { props.children.clone() }
        </nav>
    }
}
