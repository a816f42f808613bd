use crate::models::Term;

/// Etiqueta visible y clave de orden de un término
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemesterSlot {
    pub label: String,
    pub order: u32,
}

/// Año académico de un término 1-based: dos términos por año
pub fn year_for_term(term_number: u32) -> u32 {
    term_number.div_ceil(2)
}

/// "Fall" + término 3 -> "Fall Year 2"
pub fn semester_label(term_number: u32, custom_label: &str) -> String {
    format!("{} Year {}", custom_label, year_for_term(term_number))
}

pub fn semester_slot(term: &Term) -> SemesterSlot {
    SemesterSlot {
        label: semester_label(term.term_number, &term.custom_label),
        order: term.term_number,
    }
}
