use super::super::view_model::ImportWizardVm;
use crate::shared::icons::icon;
use leptos::prelude::*;
use thaw::*;

/// Шаг 1: выбор источника товаров
#[component]
pub fn SourceStep(vm: ImportWizardVm) -> impl IntoView {
    view! {
        <div class="wizard-step">
            <h3 class="wizard-step__title">"Choose a source"</h3>
            {move || {
                if vm.sources_loading.get() {
                    return view! {
                        <Flex gap=FlexGap::Small style="align-items: center; padding: var(--spacing-lg);">
                            <Spinner />
                            <span>"Loading sources..."</span>
                        </Flex>
                    }.into_any();
                }
                let sources = vm.sources.get();
                if sources.is_empty() {
                    return view! {
                        <div class="warning-box">"No import sources are configured"</div>
                    }.into_any();
                }
                view! {
                    <div class="source-grid">
                        {sources
                            .into_iter()
                            .map(|source| {
                                let enabled = source.enabled;
                                let class = if enabled {
                                    "source-card"
                                } else {
                                    "source-card source-card--disabled"
                                };
                                let kind = source.kind;
                                let name = source.name.clone();
                                let description = source.description.clone().unwrap_or_default();
                                view! {
                                    <button
                                        class=class
                                        disabled=!enabled
                                        on:click=move |_| vm.select_source(source.clone())
                                    >
                                        <span class="source-card__icon">{icon(kind.icon())}</span>
                                        <span class="source-card__name">{name}</span>
                                        <span class="source-card__kind">{kind.display_name()}</span>
                                        <span class="source-card__description">{description}</span>
                                    </button>
                                }
                            })
                            .collect_view()}
                    </div>
                }.into_any()
            }}
        </div>
    }
}
