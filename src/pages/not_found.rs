use leptos::prelude::*;

use crate::components::SpinningGears;

/// 404 Not Found Page
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<main class="showcase">
			<h1>"Uh oh!" <br /> "We couldn't find that page!"</h1>
			<SpinningGears class="not-found-art" />
			<a href="/">"Back home"</a>
		</main>
	}
}
