use crate::models::{Opportunity, PathwayElement};

/// Campos visibles de un elemento ya resueltos según su variante
#[derive(Debug, Clone, PartialEq)]
pub struct ElementDisplay<'a> {
    pub code: &'a str,
    pub title: &'a str,
    pub units: i64,
    pub description: Option<&'a str>,
    pub is_choice: bool,
    pub choice_description: Option<&'a str>,
}

/// Resuelve código, título, unidades y descripción de un elemento.
/// - Choice: código = nombre del elemento, título = descripción corta,
///   unidades = mínimas, descripción = la de la oportunidad o la corta.
/// - Course: código/título de la oportunidad con fallback al elemento,
///   unidades = máximas o mínimas, descripción sólo la de la oportunidad.
pub fn classify(element: &PathwayElement) -> ElementDisplay<'_> {
    let description = long_description(element);
    let is_choice = element.recommended_opportunity.is_choice();
    ElementDisplay {
        code: display_code(element),
        title: display_title(element),
        units: round_units(display_units(element)),
        description,
        is_choice,
        choice_description: if is_choice { description } else { None },
    }
}

/// Código visible. Es la misma regla para el propio elemento y para cuando
/// aparece como prerequisito de otro.
pub fn display_code(element: &PathwayElement) -> &str {
    match &element.recommended_opportunity {
        Opportunity::Choice { .. } => element.name.as_str(),
        Opportunity::Course { course_code, .. } => non_empty(course_code).unwrap_or(element.name.as_str()),
    }
}

pub fn display_title(element: &PathwayElement) -> &str {
    match &element.recommended_opportunity {
        Opportunity::Choice { .. } => element.short_description.as_str(),
        Opportunity::Course { course_name, .. } => {
            non_empty(course_name).unwrap_or(element.short_description.as_str())
        }
    }
}

/// Unidades antes de redondear. Un `maxUnits` en cero cuenta como ausente.
pub fn display_units(element: &PathwayElement) -> f64 {
    match &element.recommended_opportunity {
        Opportunity::Choice { min_units, .. } => *min_units,
        Opportunity::Course { min_units, max_units, .. } => match max_units {
            Some(max) if *max != 0.0 => *max,
            _ => *min_units,
        },
    }
}

pub fn long_description(element: &PathwayElement) -> Option<&str> {
    match &element.recommended_opportunity {
        Opportunity::Choice { description, .. } => {
            Some(non_empty(description).unwrap_or(element.short_description.as_str()))
        }
        // nunca cae a la descripción corta
        Opportunity::Course { description, .. } => non_empty(description),
    }
}

/// Redondeo al entero más cercano, mitades hacia +∞ (2.5 -> 3, -2.5 -> -2).
/// `floor(x + 0.5)` daría 1 para 0.49999999999999994.
pub fn round_units(value: f64) -> i64 {
    let floor = value.floor();
    if value - floor >= 0.5 { floor as i64 + 1 } else { floor as i64 }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
