use crate::models::Course;

/// Case-insensitive substring test
///
/// An empty needle is contained in every haystack.
#[inline]
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Check if a course matches a free-text search term
///
/// The term is matched against the name, description and provider. A missing
/// or blank term matches every course.
#[inline]
pub fn matches_search_term(course: &Course, term: Option<&str>) -> bool {
    let term = match term.map(str::trim) {
        Some(term) if !term.is_empty() => term,
        _ => return true,
    };

    contains_ignore_case(&course.name, term)
        || contains_ignore_case(&course.description, term)
        || contains_ignore_case(&course.provider, term)
}

/// Check if a course location contains the given location
#[inline]
pub fn matches_location(course: &Course, location: &str) -> bool {
    contains_ignore_case(&course.location, location)
}

/// Filter a catalog snapshot by search term
pub fn search_courses(courses: &[Course], term: Option<&str>) -> Vec<Course> {
    courses
        .iter()
        .filter(|course| matches_search_term(course, term))
        .cloned()
        .collect()
}

/// Filter a catalog snapshot by location
pub fn courses_by_location(courses: &[Course], location: &str) -> Vec<Course> {
    courses
        .iter()
        .filter(|course| matches_location(course, location))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_course(name: &str, description: &str, provider: &str, location: &str) -> Course {
        Course {
            name: name.to_string(),
            description: description.to_string(),
            provider: provider.to_string(),
            location: location.to_string(),
            ..Course::default()
        }
    }

    fn create_catalog() -> Vec<Course> {
        vec![
            create_test_course("Confeiteiro", "Curso de confeitaria profissional", "SENAC", "Curitiba, PR"),
            create_test_course("Técnico em Logística", "Gestão de estoque", "SENAI", "Campinas, SP"),
            create_test_course("Cuidador de Idosos", "Cuidados com pessoas idosas", "SENAC", "São Paulo, SP"),
        ]
    }

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("São Caetano do Sul, SP", "são caetano"));
        assert!(contains_ignore_case("anything", ""));
        assert!(!contains_ignore_case("", "sp"));
        assert!(!contains_ignore_case("São Caetano do Sul, SP", "São Paulo"));
    }

    #[test]
    fn test_contains_ignore_case_folds_accented_letters() {
        assert!(contains_ignore_case("SÃO PAULO, SP", "são paulo"));
        assert!(contains_ignore_case("Técnico em Logística", "TÉCNICO"));
        // Unicode lowercasing, not full case folding
        assert!(!contains_ignore_case("STRASSE", "straße"));
    }

    #[test]
    fn test_search_matches_any_text_field() {
        let catalog = create_catalog();

        assert_eq!(search_courses(&catalog, Some("confeitaria")).len(), 1);
        assert_eq!(search_courses(&catalog, Some("senac")).len(), 2);
        assert_eq!(search_courses(&catalog, Some("ESTOQUE"))[0].name, "Técnico em Logística");
        assert!(search_courses(&catalog, Some("soldagem")).is_empty());
    }

    #[test]
    fn test_blank_search_returns_everything() {
        let catalog = create_catalog();

        assert_eq!(search_courses(&catalog, None).len(), 3);
        assert_eq!(search_courses(&catalog, Some("")).len(), 3);
        assert_eq!(search_courses(&catalog, Some("   ")).len(), 3);
    }

    #[test]
    fn test_location_filter_only_checks_location() {
        let catalog = create_catalog();

        let in_sp = courses_by_location(&catalog, ", sp");
        assert_eq!(in_sp.len(), 2);

        // Name mentions neither city
        assert!(courses_by_location(&catalog, "Confeiteiro").is_empty());
    }
}
