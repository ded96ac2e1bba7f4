use super::super::view_model::ImportWizardVm;
use crate::shared::icons::icon;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn DoneStep(vm: ImportWizardVm) -> impl IntoView {
    let result = vm.state.with_untracked(|s| s.result().cloned()).unwrap_or_default();
    let partial = result.has_partial_failure();

    view! {
        <div class="wizard-step wizard-step--done">
            <h3 class="wizard-step__title">
                {if partial { icon("alert") } else { icon("check") }}
                {if partial { " Import finished with problems" } else { " Import finished" }}
            </h3>
            <dl class="confirm-summary">
                <dt>"Created"</dt>
                <dd>{result.imported}</dd>
                <dt>"Stock updated"</dt>
                <dd>{result.stock_updated}</dd>
                <dt>"Skipped"</dt>
                <dd>{result.skipped}</dd>
                <dt>"Errors"</dt>
                <dd>{result.errors}</dd>
            </dl>

            {(!result.messages.is_empty()).then(|| view! {
                <ul class="wizard-step__messages">
                    {result.messages
                        .into_iter()
                        .map(|message| view! { <li>{message}</li> })
                        .collect_view()}
                </ul>
            })}

            <div class="wizard-step__actions">
                <a class="button button--secondary" href="/products">
                    {icon("products")}
                    " Open catalog"
                </a>
                <Button appearance=ButtonAppearance::Primary on_click=move |_| vm.start_over()>
                    {icon("refresh")}
                    " Import more"
                </Button>
            </div>
        </div>
    }
}
