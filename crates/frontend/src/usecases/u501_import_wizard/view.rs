use super::steps::{ConfigureStep, ConfirmStep, DoneStep, SearchStep, SourceStep};
use super::view_model::ImportWizardVm;
use crate::shared::notifications::use_notifications;
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u501_import_wizard::{ImportWizard, WizardSettings, WizardStep};
use leptos::prelude::*;

#[component]
pub fn ImportWizardPage(settings: WizardSettings) -> impl IntoView {
    log::debug!("Mounting {}", ImportWizard::full_name());
    let vm = ImportWizardVm::new(settings, use_notifications());
    vm.load_reference_data();

    // Re-render the body only when the step changes, not on every edit
    let step = Memo::new(move |_| vm.step());

    view! {
        <div class="page import-wizard">
            <div class="page__header">
                <h2 class="page__title">{ImportWizard::display_name()}</h2>
                <p class="page__subtitle">{ImportWizard::description()}</p>
            </div>

            <StepIndicator step=step />

            <div class="import-wizard__body">
                {move || match step.get() {
                    WizardStep::SelectSource => view! { <SourceStep vm=vm /> }.into_any(),
                    WizardStep::Search => view! { <SearchStep vm=vm /> }.into_any(),
                    WizardStep::Configure => view! { <ConfigureStep vm=vm /> }.into_any(),
                    WizardStep::Confirm => view! { <ConfirmStep vm=vm /> }.into_any(),
                    WizardStep::Done => view! { <DoneStep vm=vm /> }.into_any(),
                }}
            </div>
        </div>
    }
}

#[component]
fn StepIndicator(step: Memo<WizardStep>) -> impl IntoView {
    view! {
        <ol class="wizard-steps">
            {WizardStep::all()
                .into_iter()
                .map(|s| {
                    let class = move || {
                        let current = step.get().index();
                        if s.index() == current {
                            "wizard-steps__item wizard-steps__item--active"
                        } else if s.index() < current {
                            "wizard-steps__item wizard-steps__item--done"
                        } else {
                            "wizard-steps__item"
                        }
                    };
                    view! {
                        <li class=class>
                            <span class="wizard-steps__number">{s.index() + 1}</span>
                            <span class="wizard-steps__title">{s.title()}</span>
                        </li>
                    }
                })
                .collect_view()}
        </ol>
    }
}
