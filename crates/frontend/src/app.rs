use crate::shared::notifications::{NotificationHost, NotificationService};
use crate::shared::settings::load_settings;
use crate::usecases::u501_import_wizard::ImportWizardPage;
use contracts::usecases::u501_import_wizard::WizardSettings;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[component]
pub fn App() -> impl IntoView {
    // Уведомления общие для всех страниц
    provide_context(NotificationService::new());

    let (settings, set_settings) = signal(None::<WizardSettings>);
    spawn_local(async move {
        set_settings.set(Some(load_settings().await));
    });

    view! {
        <div class="app-shell">
            <header class="app-header">
                <span class="app-header__title">"Catalog"</span>
                <a class="app-header__link" href="/products">"Products"</a>
            </header>
            <main class="app-main">
                {move || match settings.get() {
                    Some(settings) => view! { <ImportWizardPage settings=settings /> }.into_any(),
                    None => view! {
                        <Flex gap=FlexGap::Small style="align-items: center; padding: var(--spacing-4xl); justify-content: center;">
                            <Spinner />
                            <span>"Loading settings..."</span>
                        </Flex>
                    }.into_any(),
                }}
            </main>
            <NotificationHost />
        </div>
    }
}
