use super::super::view_model::ImportWizardVm;
use crate::shared::format::format_price;
use crate::shared::icons::icon;
use leptos::prelude::*;
use thaw::*;
use wasm_bindgen::JsCast;

/// Шаг 2: поиск в каталоге или загрузка файла, в зависимости от источника
#[component]
pub fn SearchStep(vm: ImportWizardVm) -> impl IntoView {
    let source = vm.state.with_untracked(|s| s.source().cloned());
    let Some(source) = source else {
        return view! { <div class="warning-box warning-box--error">"No source selected"</div> }
            .into_any();
    };

    let input_panel = if source.kind.is_upload() {
        view! { <UploadPanel vm=vm accept=source.kind.accept().unwrap_or_default() /> }.into_any()
    } else {
        view! { <SearchPanel vm=vm /> }.into_any()
    };

    let row_count = move || vm.state.with(|s| s.rows().len());

    view! {
        <div class="wizard-step">
            <h3 class="wizard-step__title">{source.name.clone()}</h3>
            {input_panel}

            <Show when=move || { row_count() > 0 }>
                <div class="wizard-step__counter">
                    {move || format!("{} products found", row_count())}
                </div>
                <Table>
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell>"Code"</TableHeaderCell>
                            <TableHeaderCell>"Name"</TableHeaderCell>
                            <TableHeaderCell attr:style="text-align: right;">"Cost"</TableHeaderCell>
                            <TableHeaderCell attr:style="text-align: right;">"Stock"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || vm.state.with(|s| {
                            s.rows()
                                .iter()
                                .map(|row| {
                                    let code = row.code.clone();
                                    let name = row.name.clone();
                                    let cost = format_price(row.cost_price);
                                    let stock = row.stock_quantity;
                                    view! {
                                        <TableRow>
                                            <TableCell>{code}</TableCell>
                                            <TableCell>{name}</TableCell>
                                            <TableCell attr:style="text-align: right;">{cost}</TableCell>
                                            <TableCell attr:style="text-align: right;">{stock}</TableCell>
                                        </TableRow>
                                    }
                                })
                                .collect_view()
                        })}
                    </TableBody>
                </Table>
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
            </Show>

            <div class="wizard-step__actions">
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| vm.back()
                    disabled=Signal::derive(move || vm.is_busy())
                >
                    {icon("arrow-left")}
                    " Back"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| vm.go_to_configure()
                    disabled=Signal::derive(move || vm.is_busy() || row_count() == 0)
                >
                    "Next "
                    {icon("arrow-right")}
                </Button>
            </div>
        </div>
    }
    .into_any()
}

#[component]
fn SearchPanel(vm: ImportWizardVm) -> impl IntoView {
    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Enter" {
            vm.search();
        }
    };

    view! {
        <div class="wizard-step__toolbar" on:keydown=on_keydown>
            <Input value=vm.query placeholder="Product name or code" />
            <Button
                appearance=ButtonAppearance::Primary
                on_click=move |_| vm.search()
                disabled=Signal::derive(move || vm.is_searching())
            >
                {icon("search")}
                {move || if vm.is_searching() { " Searching..." } else { " Search" }}
            </Button>
        </div>
    }
}

#[component]
fn UploadPanel(vm: ImportWizardVm, accept: &'static str) -> impl IntoView {
    let on_file_select = move |ev: web_sys::Event| {
        let input = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok());
        if let Some(file) = input.and_then(|i| i.files()).and_then(|files| files.get(0)) {
            vm.upload(file);
        }
    };

    view! {
        <div class="wizard-step__toolbar">
            <label class="button button--primary" for="import-file-input">
                {icon("upload")}
                " Choose file"
            </label>
            <input
                id="import-file-input"
                type="file"
                accept=accept
                on:change=on_file_select
                class="hidden"
                disabled=move || vm.uploading.get()
            />
            {move || {
                if vm.uploading.get() {
                    view! {
                        <Flex gap=FlexGap::Small style="align-items: center;">
                            <Spinner size=SpinnerSize::Small />
                            <span>"Parsing..."</span>
                        </Flex>
                    }.into_any()
                } else if let Some(name) = vm.file_name.get() {
                    view! { <span class="wizard-step__file-name">{icon("file")}<strong>{name}</strong></span> }.into_any()
                } else {
                    view! { <span class="wizard-step__hint">"No file chosen"</span> }.into_any()
                }
            }}
        </div>
    }
}
