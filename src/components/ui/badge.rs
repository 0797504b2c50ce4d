use leptos::prelude::*;
use leptos_ui::clx;

mod components {
    use super::*;
    clx! {Badge, span, "inline-flex items-center rounded-md bg-muted px-2 py-0.5 text-xs text-muted-foreground"}
    clx! {BadgeList, div, "flex flex-wrap gap-1"}
}

pub use components::*;
