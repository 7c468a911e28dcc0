use leptos::prelude::*;

use crate::components::{BuildingGrowthAnimation, IntegrationAnimation, PlugAnimation, SpinningGears};

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<main class="showcase">
				<section class="hero">
					<h1>"Grow with us"</h1>
					<p class="subtitle">"From corner shop to skyline."</p>
					<PlugAnimation class="cta">
						<button type="button">"Get connected"</button>
					</PlugAnimation>
				</section>

				<section class="feature">
					<h2>"Built to scale"</h2>
					<BuildingGrowthAnimation class="feature-art" />
				</section>

				<section class="feature">
					<h2>"Everything talks to everything"</h2>
					<IntegrationAnimation class="feature-art" />
				</section>

				<section class="feature">
					<h2>"Automation that keeps turning"</h2>
					<SpinningGears class="feature-art" />
				</section>
			</main>
		</ErrorBoundary>
	}
}
