//! Built-in seed catalog
//!
//! Used to seed an empty course table on first start and as the fallback
//! data set when the course store cannot be reached.

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::models::{Course, EducationLevel, ProgramType};

struct SeedCourse {
    name: &'static str,
    description: &'static str,
    provider: &'static str,
    program: ProgramType,
    duration: &'static str,
    weekly_hours: u32,
    stipend: f64,
    location: &'static str,
    available_vacancies: u32,
    min_education_required: EducationLevel,
    areas: &'static [&'static str],
    /// Days from today
    starts_in: i64,
    deadline_in: i64,
    thumbnail: &'static str,
    average_student_age: f64,
}

const SEED_COURSES: &[SeedCourse] = &[
    SeedCourse {
        name: "Técnico em Manutenção Elétrica",
        description: "Formação técnica em manutenção de sistemas elétricos",
        provider: "SENAI",
        program: ProgramType::AutonomiaERenda,
        duration: "6 meses",
        weekly_hours: 20,
        stipend: 858.0,
        location: "São Caetano do Sul, SP",
        available_vacancies: 45,
        min_education_required: EducationLevel::Medio,
        areas: &["Técnico", "Industrial", "Elétrica"],
        starts_in: 0,
        deadline_in: 30,
        thumbnail: "Elétrica",
        average_student_age: 28.0,
    },
    SeedCourse {
        name: "Operador de Computador",
        description: "Curso de formação para operador de sistemas informatizados",
        provider: "SENAC",
        program: ProgramType::PronatecFic,
        duration: "3 meses",
        weekly_hours: 15,
        stipend: 0.0,
        location: "Rio de Janeiro, RJ",
        available_vacancies: 120,
        min_education_required: EducationLevel::Fundamental,
        areas: &["Informática", "Administrativo"],
        starts_in: 0,
        deadline_in: 15,
        thumbnail: "Informática",
        average_student_age: 32.0,
    },
    SeedCourse {
        name: "Auxiliar de Serviços Diversos",
        description: "Preparação para atuação em serviços gerais",
        provider: "IFPE",
        program: ProgramType::AutonomiaERenda,
        duration: "2 meses",
        weekly_hours: 16,
        stipend: 660.0,
        location: "Recife, PE",
        available_vacancies: 80,
        min_education_required: EducationLevel::Fundamental,
        areas: &["Serviços", "Limpeza", "Manutenção"],
        starts_in: -5,
        deadline_in: 25,
        thumbnail: "Serviços",
        average_student_age: 45.0,
    },
    SeedCourse {
        name: "Técnico em Segurança do Trabalho",
        description: "Especialização em normas e procedimentos de segurança",
        provider: "IFRS",
        program: ProgramType::PronatecTecnico,
        duration: "6 meses",
        weekly_hours: 25,
        stipend: 0.0,
        location: "Canoas, RS",
        available_vacancies: 35,
        min_education_required: EducationLevel::Medio,
        areas: &["Segurança", "Trabalho", "Administrativo"],
        starts_in: 0,
        deadline_in: 20,
        thumbnail: "Segurança",
        average_student_age: 35.0,
    },
    SeedCourse {
        name: "Técnico em Enfermagem",
        description: "Formação para atuação na área de saúde",
        provider: "SENAI",
        program: ProgramType::PronatecTecnico,
        duration: "12 meses",
        weekly_hours: 30,
        stipend: 0.0,
        location: "Belo Horizonte, MG",
        available_vacancies: 50,
        min_education_required: EducationLevel::Medio,
        areas: &["Saúde", "Enfermagem", "Hospitalar"],
        starts_in: 10,
        deadline_in: 35,
        thumbnail: "Enfermagem",
        average_student_age: 40.0,
    },
    SeedCourse {
        name: "Soldador (Processos MIG/MAG)",
        description: "Capacitação em solda com processos modernos",
        provider: "SENAI",
        program: ProgramType::AutonomiaERenda,
        duration: "4 meses",
        weekly_hours: 20,
        stipend: 750.0,
        location: "Porto Alegre, RS",
        available_vacancies: 60,
        min_education_required: EducationLevel::Fundamental,
        areas: &["Industrial", "Soldagem", "Técnico"],
        starts_in: 0,
        deadline_in: 18,
        thumbnail: "Soldagem",
        average_student_age: 30.0,
    },
    SeedCourse {
        name: "Cuidador de Idosos",
        description: "Formação para cuidados com pessoas idosas",
        provider: "SENAC",
        program: ProgramType::PronatecFic,
        duration: "3 meses",
        weekly_hours: 20,
        stipend: 0.0,
        location: "São Paulo, SP",
        available_vacancies: 40,
        min_education_required: EducationLevel::Fundamental,
        areas: &["Saúde", "Cuidados", "Social"],
        starts_in: 0,
        deadline_in: 22,
        thumbnail: "Cuidador",
        average_student_age: 38.0,
    },
    SeedCourse {
        name: "Confeiteiro",
        description: "Curso de confeitaria profissional",
        provider: "SENAC",
        program: ProgramType::PronatecFic,
        duration: "4 meses",
        weekly_hours: 16,
        stipend: 0.0,
        location: "Curitiba, PR",
        available_vacancies: 25,
        min_education_required: EducationLevel::Fundamental,
        areas: &["Gastronomia", "Alimentação", "Empreendedorismo"],
        starts_in: 5,
        deadline_in: 30,
        thumbnail: "Confeitaria",
        average_student_age: 35.0,
    },
    SeedCourse {
        name: "Assistente Administrativo",
        description: "Formação em rotinas administrativas e atendimento",
        provider: "SESC",
        program: ProgramType::AutonomiaERenda,
        duration: "5 meses",
        weekly_hours: 20,
        stipend: 900.0,
        location: "Salvador, BA",
        available_vacancies: 55,
        min_education_required: EducationLevel::Medio,
        areas: &["Administrativo", "Atendimento", "Escritório"],
        starts_in: 0,
        deadline_in: 25,
        thumbnail: "Administrativo",
        average_student_age: 28.0,
    },
    SeedCourse {
        name: "Técnico em Logística",
        description: "Gestão de estoque, transporte e distribuição",
        provider: "SENAI",
        program: ProgramType::PronatecTecnico,
        duration: "8 meses",
        weekly_hours: 25,
        stipend: 0.0,
        location: "Campinas, SP",
        available_vacancies: 30,
        min_education_required: EducationLevel::Medio,
        areas: &["Logística", "Transporte", "Gestão"],
        starts_in: 10,
        deadline_in: 40,
        thumbnail: "Logística",
        average_student_age: 32.0,
    },
];

/// Build the seed catalog with fresh ids and enrollment windows relative to now
pub fn mock_courses() -> Vec<Course> {
    let now = Utc::now();

    SEED_COURSES
        .iter()
        .map(|seed| Course {
            id: Uuid::new_v4(),
            name: seed.name.to_string(),
            description: seed.description.to_string(),
            provider: seed.provider.to_string(),
            program: seed.program,
            duration: seed.duration.to_string(),
            weekly_hours: seed.weekly_hours,
            stipend: seed.stipend,
            location: seed.location.to_string(),
            available_vacancies: seed.available_vacancies,
            min_education_required: seed.min_education_required,
            areas: seed.areas.iter().map(|a| a.to_string()).collect(),
            enrollment_start_date: now + Duration::days(seed.starts_in),
            enrollment_deadline: now + Duration::days(seed.deadline_in),
            thumbnail_url: format!(
                "https://via.placeholder.com/300x200?text={}",
                urlencoding::encode(seed.thumbnail)
            ),
            average_student_age: seed.average_student_age,
            match_score: 0.0,
        })
        .collect()
}
