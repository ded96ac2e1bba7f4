use super::super::view_model::ImportWizardVm;
use super::batch_table::BatchTable;
use crate::shared::icons::icon;
use leptos::prelude::*;
use thaw::*;

/// Шаг 3: проверка пакета, цены, поставщик и категория
#[component]
pub fn ConfigureStep(vm: ImportWizardVm) -> impl IntoView {
    let presets = vm.state.with_untracked(|s| s.settings().presets());
    let (margin_min, margin_max) = vm
        .state
        .with_untracked(|s| (s.settings().custom_margin_min, s.settings().custom_margin_max));

    Effect::new(move |_| vm.set_supplier(vm.supplier_value.get()));
    Effect::new(move |_| vm.set_category(vm.category_value.get()));

    let summary = Memo::new(move |_| vm.state.with(|s| s.summary()));
    let blocker = Memo::new(move |_| vm.state.with(|s| s.proceed_blocker()));
    let checking = move || vm.state.with(|s| s.is_checking_codes());
    let current_margin = move || {
        vm.state
            .with(|s| s.margin().map(|m| m.label()))
            .unwrap_or_else(|| "none".to_string())
    };

    view! {
        <div class="wizard-step">
            <div class="wizard-step__toolbar">
                <span class="form__label">"Margin"</span>
                {presets
                    .into_iter()
                    .map(|multiplier| view! {
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| vm.apply_margin(multiplier)
                        >
                            {multiplier.label()}
                        </Button>
                    })
                    .collect_view()}
                <Input
                    value=vm.custom_margin
                    placeholder=format!("{}–{}", margin_min, margin_max)
                    attr:style="width: 90px;"
                />
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| vm.apply_custom_margin()>
                    "Apply"
                </Button>
                <span class="wizard-step__hint">{move || format!("Last applied: {}", current_margin())}</span>
            </div>

            <div class="wizard-step__toolbar">
                <div class="form__group">
                    <label class="form__label">"Supplier"</label>
                    <Select value=vm.supplier_value>
                        <option value="">"Not set"</option>
                        {move || vm.suppliers.get()
                            .into_iter()
                            .map(|supplier| view! { <option value=supplier.id>{supplier.name}</option> })
                            .collect_view()}
                    </Select>
                </div>
                <div class="form__group">
                    <label class="form__label">"Category"</label>
                    <Select value=vm.category_value>
                        <option value="">"Not set"</option>
                        {move || vm.categories.get()
                            .into_iter()
                            .map(|category| view! { <option value=category.id>{category.name}</option> })
                            .collect_view()}
                    </Select>
                </div>
                {move || {
                    let number = vm.state.with(|s| s.invoice().map(|invoice| invoice.number.clone()));
                    number.map(|number| view! {
                        <div class="form__group">
                            <label class="form__label">"Invoice number"</label>
                            <input
                                class="batch-table__input"
                                type="text"
                                prop:value=number
                                on:change=move |ev| vm.edit_invoice_number(event_target_value(&ev))
                            />
                        </div>
                    })
                }}
            </div>

            <div class="wizard-step__summary">
                {move || {
                    let s = summary.get();
                    format!(
                        "{} rows, {} selected: {} new, {} already in catalog, {} duplicate codes",
                        s.total, s.selected, s.new, s.existing, s.duplicates
                    )
                }}
                <Show when=checking>
                    <span class="wizard-step__checking">
                        <Spinner size=SpinnerSize::Small />
                        " Checking codes..."
                    </span>
                </Show>
            </div>

            {move || blocker.get().map(|b| view! {
                <div class="warning-box warning-box--error">{icon("alert")}" "{b.to_string()}</div>
            })}

            <BatchTable vm=vm />

            <Show when=move || vm.state.with(|s| s.pager().has_more())>
                <div class="wizard-step__more">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| vm.load_more()
                        disabled=Signal::derive(move || vm.is_searching())
                    >
                        {icon("refresh")}
                        {move || if vm.is_searching() { " Loading..." } else { " Load more" }}
                    </Button>
                </div>
            </Show>

            <div class="wizard-step__actions">
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| vm.back()>
                    {icon("arrow-left")}
                    " Back"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| vm.go_to_confirm()
                    disabled=Signal::derive(move || {
                        blocker.get().is_some() || vm.is_searching() || checking()
                    })
                >
                    "Next "
                    {icon("arrow-right")}
                </Button>
            </div>
        </div>
    }
}
