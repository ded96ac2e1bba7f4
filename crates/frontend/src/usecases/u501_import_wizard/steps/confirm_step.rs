use super::super::view_model::ImportWizardVm;
use crate::shared::format::{format_optional_price, format_price};
use crate::shared::icons::icon;
use contracts::usecases::u501_import_wizard::ImportAction;
use leptos::prelude::*;
use thaw::*;

/// Шаг 4: показать, что будет отправлено, и запустить импорт
#[component]
pub fn ConfirmStep(vm: ImportWizardVm) -> impl IntoView {
    let plan = vm.state.with_untracked(|s| s.build_execute_request());
    let plan = match plan {
        Ok(plan) => plan,
        Err(e) => {
            return view! { <div class="warning-box warning-box--error">{e.to_string()}</div> }
                .into_any()
        }
    };

    let request = plan.request;
    let supplier = request.supplier_id.as_ref().and_then(|id| {
        vm.suppliers
            .with_untracked(|list| list.iter().find(|s| &s.id == id).map(|s| s.name.clone()))
    });
    let category = request.category_id.as_ref().and_then(|id| {
        vm.categories
            .with_untracked(|list| list.iter().find(|c| &c.id == id).map(|c| c.name.clone()))
    });
    let creates = request
        .items
        .iter()
        .filter(|item| item.action == ImportAction::Create)
        .count();
    let stock_updates = request.items.len() - creates;
    let invoice = request.invoice.clone();

    view! {
        <div class="wizard-step">
            <h3 class="wizard-step__title">"Ready to import"</h3>
            <dl class="confirm-summary">
                <dt>"New products"</dt>
                <dd>{creates}</dd>
                <dt>"Stock additions"</dt>
                <dd>{stock_updates}</dd>
                <dt>"Supplier"</dt>
                <dd>{supplier.unwrap_or_else(|| "Not set".to_string())}</dd>
                <dt>"Category"</dt>
                <dd>{category.unwrap_or_else(|| "Not set".to_string())}</dd>
                {invoice.map(|invoice| view! {
                    <dt>"Invoice"</dt>
                    <dd>
                        {invoice.number}
                        {invoice.issued_on.map(|d| format!(" from {}", d.format("%d.%m.%Y")))}
                        {invoice.total.map(|t| format!(", total {}", format_price(t)))}
                    </dd>
                })}
            </dl>

            {(!plan.locally_skipped.is_empty()).then(|| view! {
                <div class="warning-box">
                    {icon("alert")}
                    {format!(
                        " Duplicate codes are submitted once: {}",
                        plan.locally_skipped.join(", ")
                    )}
                </div>
            })}

            <Table>
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell>"Action"</TableHeaderCell>
                        <TableHeaderCell>"Code"</TableHeaderCell>
                        <TableHeaderCell>"Name"</TableHeaderCell>
                        <TableHeaderCell attr:style="text-align: right;">"Retail"</TableHeaderCell>
                        <TableHeaderCell attr:style="text-align: right;">"Wholesale"</TableHeaderCell>
                        <TableHeaderCell attr:style="text-align: right;">"Qty"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {request.items
                        .into_iter()
                        .map(|item| {
                            let action = match item.action {
                                ImportAction::Create => view! {
                                    <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Success>"Create"</Badge>
                                }.into_any(),
                                ImportAction::AddStock => view! {
                                    <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Warning>"Add stock"</Badge>
                                }.into_any(),
                            };
                            view! {
                                <TableRow>
                                    <TableCell>{action}</TableCell>
                                    <TableCell>{item.code}</TableCell>
                                    <TableCell>{item.name}</TableCell>
                                    <TableCell attr:style="text-align: right;">{format_optional_price(item.price_retail)}</TableCell>
                                    <TableCell attr:style="text-align: right;">{format_optional_price(item.price_wholesale)}</TableCell>
                                    <TableCell attr:style="text-align: right;">{item.stock_quantity}</TableCell>
                                </TableRow>
                            }
                        })
                        .collect_view()}
                </TableBody>
            </Table>

            <div class="wizard-step__actions">
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| vm.back()
                    disabled=Signal::derive(move || vm.importing.get())
                >
                    {icon("arrow-left")}
                    " Back"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| vm.execute_import()
                    disabled=Signal::derive(move || vm.importing.get())
                >
                    {icon("check")}
                    {move || if vm.importing.get() { " Importing..." } else { " Import" }}
                </Button>
            </div>
        </div>
    }
    .into_any()
}
