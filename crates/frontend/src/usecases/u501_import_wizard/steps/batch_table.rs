use super::super::view_model::ImportWizardVm;
use crate::shared::format::{format_optional_price, format_price, parse_price_input};
use crate::shared::notifications::use_notifications;
use contracts::usecases::u501_import_wizard::{ProductToImport, RowStatus};
use leptos::prelude::*;
use thaw::*;

fn status_color(status: RowStatus) -> BadgeColor {
    match status.badge_variant() {
        "success" => BadgeColor::Success,
        "error" => BadgeColor::Danger,
        "warning" => BadgeColor::Warning,
        _ => BadgeColor::Informative,
    }
}

fn read_row<T: Default>(
    vm: ImportWizardVm,
    row_id: usize,
    read: impl FnOnce(&ProductToImport) -> T,
) -> T {
    vm.state
        .with(|s| s.row(row_id).map(read).unwrap_or_default())
}

/// Редактируемая таблица пакета
#[component]
pub fn BatchTable(vm: ImportWizardVm) -> impl IntoView {
    let all_selected = move || {
        vm.state
            .with(|s| !s.rows().is_empty() && s.rows().iter().all(|row| row.selected))
    };

    view! {
        <Table class="batch-table">
            <TableHeader>
                <TableRow>
                    <TableHeaderCell attr:style="width: 32px;">
                        <div style="text-align: center;">
                            <input
                                type="checkbox"
                                title="Select all"
                                prop:checked=all_selected
                                on:change=move |ev| vm.set_all_selected(event_target_checked(&ev))
                            />
                        </div>
                    </TableHeaderCell>
                    <TableHeaderCell>"Status"</TableHeaderCell>
                    <TableHeaderCell>"Code"</TableHeaderCell>
                    <TableHeaderCell>"Name"</TableHeaderCell>
                    <TableHeaderCell attr:style="text-align: right;">"Cost"</TableHeaderCell>
                    <TableHeaderCell attr:style="text-align: right;">"Retail"</TableHeaderCell>
                    <TableHeaderCell attr:style="text-align: right;">"Wholesale"</TableHeaderCell>
                    <TableHeaderCell attr:style="text-align: right;">"Qty"</TableHeaderCell>
                </TableRow>
            </TableHeader>
            <TableBody>
                <For
                    each=move || vm.row_ids()
                    key=|row_id| *row_id
                    children=move |row_id| view! { <BatchRow vm=vm row_id=row_id /> }
                />
            </TableBody>
        </Table>
    }
}

#[component]
fn BatchRow(vm: ImportWizardVm, row_id: usize) -> impl IntoView {
    let notifications = use_notifications();

    let status = move || vm.status_of(row_id);
    let selected = move || read_row(vm, row_id, |row| row.selected);
    let exists = move || read_row(vm, row_id, |row| row.exists);
    let missing_price = move || {
        read_row(vm, row_id, |row| {
            row.selected && row.needs_retail_price() && !row.has_valid_retail_price()
        })
    };

    let on_price_change = move |input: String, retail: bool| match parse_price_input(&input) {
        Ok(price) if retail => vm.edit_retail_price(row_id, price),
        Ok(price) => vm.edit_wholesale_price(row_id, price),
        Err(e) => notifications.warning("Invalid price", &e),
    };

    view! {
        <TableRow
            class:batch-row--unselected=move || !selected()
            class:batch-row--duplicate=move || status() == RowStatus::DuplicateInBatch
            class:batch-row--missing-price=missing_price
        >
            <TableCell>
                <div style="text-align: center;">
                    <input
                        type="checkbox"
                        prop:checked=selected
                        on:change=move |_| vm.toggle_row(row_id)
                    />
                </div>
            </TableCell>
            <TableCell>
                {move || {
                    let status = status();
                    view! {
                        <Badge appearance=BadgeAppearance::Tint color=status_color(status)>
                            {status.label()}
                        </Badge>
                    }
                }}
            </TableCell>
            <TableCell>
                <input
                    class="batch-table__input batch-table__input--code"
                    type="text"
                    prop:value=move || read_row(vm, row_id, |row| row.code.clone())
                    on:change=move |ev| vm.edit_code(row_id, event_target_value(&ev))
                />
            </TableCell>
            <TableCell>
                <input
                    class="batch-table__input"
                    type="text"
                    prop:value=move || read_row(vm, row_id, |row| row.name.clone())
                    on:change=move |ev| vm.edit_name(row_id, event_target_value(&ev))
                />
            </TableCell>
            <TableCell attr:style="text-align: right;">
                {move || read_row(vm, row_id, |row| format_price(row.cost_price))}
            </TableCell>
            <TableCell attr:style="text-align: right;">
                <input
                    class="batch-table__input batch-table__input--price"
                    type="text"
                    inputmode="decimal"
                    placeholder=move || if exists() { "not needed" } else { "required" }
                    prop:value=move || read_row(vm, row_id, |row| format_optional_price(row.price_retail))
                    on:change=move |ev| on_price_change(event_target_value(&ev), true)
                />
            </TableCell>
            <TableCell attr:style="text-align: right;">
                <input
                    class="batch-table__input batch-table__input--price"
                    type="text"
                    inputmode="decimal"
                    prop:value=move || read_row(vm, row_id, |row| format_optional_price(row.price_wholesale))
                    on:change=move |ev| on_price_change(event_target_value(&ev), false)
                />
            </TableCell>
            <TableCell attr:style="text-align: right;">
                <input
                    class="batch-table__input batch-table__input--qty"
                    type="number"
                    min="0"
                    prop:value=move || read_row(vm, row_id, |row| row.stock_quantity.to_string())
                    on:change=move |ev| {
                        let quantity = event_target_value(&ev).trim().parse::<i32>().unwrap_or(0);
                        vm.edit_stock(row_id, quantity.max(0));
                    }
                />
            </TableCell>
        </TableRow>
    }
}
