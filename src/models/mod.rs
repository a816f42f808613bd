// Estructuras de datos principales

mod pathway;
mod records;

pub use pathway::{
    AssociationKind,
    ElementAssociation,
    Opportunity,
    PathwayElement,
    PathwayMap,
    Requirement,
    Term,
};
pub use records::{Course, CourseRecord, Program, ProgramRecord};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializa_oportunidad_course_y_choice() {
        let course: Opportunity = serde_json::from_str(r#"{
            "type": "COURSE",
            "term": {"customLabel": "Fall", "termNumber": 1, "year": 1},
            "courseCode": "CS101",
            "courseName": "Intro",
            "minUnits": 3,
            "maxUnits": 4
        }"#).expect("course debe parsear");
        assert!(!course.is_choice());
        assert_eq!(course.min_units(), 3.0);
        assert_eq!(course.term().custom_label, "Fall");

        let choice: Opportunity = serde_json::from_str(r#"{
            "type": "CHOICE",
            "term": {"customLabel": "Spring", "termNumber": 2},
            "name": "GE Elective",
            "minUnits": 3,
            "maxUnits": 6
        }"#).expect("choice debe parsear");
        assert!(choice.is_choice());
        assert_eq!(choice.term().term_number, 2);
        assert_eq!(choice.term().year, None);
    }

    #[test]
    fn tipo_desconocido_es_error() {
        let res: Result<Opportunity, _> = serde_json::from_str(r#"{
            "type": "WORKSHOP",
            "term": {"customLabel": "Fall", "termNumber": 1},
            "minUnits": 1
        }"#);
        assert!(res.is_err());
    }

    #[test]
    fn association_kind_reconoce_solo_dos_tags() {
        assert_eq!(AssociationKind::parse("REQUIRES"), Some(AssociationKind::Requires));
        assert_eq!(AssociationKind::parse("REQUIREMENT_OF"), Some(AssociationKind::RequirementOf));
        assert_eq!(AssociationKind::parse("COREQUISITE"), None);
        assert_eq!(AssociationKind::parse("requires"), None);
    }
}
