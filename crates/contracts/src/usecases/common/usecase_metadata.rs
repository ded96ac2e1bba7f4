/// Метаданные use case (заголовки и логирование)
pub trait UseCaseMetadata {
    /// Индекс use case (например, "u501")
    fn usecase_index() -> &'static str;

    /// Техническое имя (например, "import_wizard")
    fn usecase_name() -> &'static str;

    /// Отображаемое имя в UI
    fn display_name() -> &'static str;

    fn description() -> &'static str {
        ""
    }

    /// Полное имя вида "u501_import_wizard"
    fn full_name() -> String {
        format!("{}_{}", Self::usecase_index(), Self::usecase_name())
    }
}
