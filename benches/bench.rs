// Criterion benchmarks for course matching

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use conecta_match::core::{calculate_match_score, search_courses, Recommender};
use conecta_match::models::{Course, EducationLevel, ProgramType, ScoringWeights, UserProfile};

const CITIES: [&str; 5] = [
    "São Paulo, SP",
    "Recife, PE",
    "Canoas, RS",
    "Curitiba, PR",
    "Campinas, SP",
];

const AREAS: [&str; 6] = ["Técnico", "Industrial", "Saúde", "Tecnologia", "Serviços", "Gastronomia"];

fn create_course(id: usize) -> Course {
    Course {
        name: format!("Curso {}", id),
        description: format!("Formação profissional número {}", id),
        provider: if id % 2 == 0 { "SENAI" } else { "SENAC" }.to_string(),
        program: match id % 3 {
            0 => ProgramType::AutonomiaERenda,
            1 => ProgramType::PronatecFic,
            _ => ProgramType::PronatecTecnico,
        },
        location: CITIES[id % CITIES.len()].to_string(),
        min_education_required: if id % 4 == 0 { EducationLevel::Superior } else { EducationLevel::Fundamental },
        areas: (0..3).map(|k| AREAS[(id + k) % AREAS.len()].to_string()).collect(),
        average_student_age: 20.0 + (id % 25) as f64,
        ..Course::default()
    }
}

fn create_profile() -> UserProfile {
    UserProfile {
        name: "Paulo Silva".to_string(),
        age: 28,
        education_level: EducationLevel::Medio,
        location: "São Paulo, SP".to_string(),
        interests: vec!["Técnico".to_string(), "Industrial".to_string()],
        eligible_programs: vec![ProgramType::AutonomiaERenda],
        ..UserProfile::default()
    }
}

fn bench_match_score(c: &mut Criterion) {
    let weights = ScoringWeights::default();
    let profile = create_profile();
    let course = create_course(0);

    c.bench_function("calculate_match_score", |b| {
        b.iter(|| calculate_match_score(black_box(&profile), black_box(&course), black_box(&weights)));
    });
}

fn bench_recommend(c: &mut Criterion) {
    let recommender = Recommender::with_default_weights();
    let profile = create_profile();

    let mut group = c.benchmark_group("recommend");

    for catalog_size in [10, 100, 1000].iter() {
        let catalog: Vec<Course> = (0..*catalog_size).map(create_course).collect();

        group.bench_with_input(
            BenchmarkId::new("recommend", catalog_size),
            catalog_size,
            |b, _| {
                b.iter(|| recommender.recommend(black_box(&profile), black_box(&catalog)));
            },
        );
    }

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let catalog: Vec<Course> = (0..1000).map(create_course).collect();

    c.bench_function("search_1000_courses", |b| {
        b.iter(|| search_courses(black_box(&catalog), black_box(Some("senac"))));
    });
}

criterion_group!(benches, bench_match_score, bench_recommend, bench_search);

criterion_main!(benches);
