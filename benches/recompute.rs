use criterion::{black_box, criterion_group, criterion_main, Criterion};
use moadaly_core::domain::{Identifiable, Transcript};

fn populated_transcript(semesters: usize, courses: usize) -> Transcript {
    let mut transcript = Transcript::new();
    transcript
        .set_prior(Some(60), Some(3.2))
        .expect("valid prior record");
    for s in 0..semesters {
        let semester = transcript.add_semester();
        for c in 0..courses {
            let course = semester.add_course();
            course
                .set_score(Some(((s * 7 + c * 13) % 101) as f64))
                .expect("score in range");
            course.set_credit_hours(3).expect("valid hours");
        }
    }
    transcript
}

fn bench_recompute(c: &mut Criterion) {
    let transcript = populated_transcript(12, 8);
    c.bench_function("recompute_12x8", |b| {
        b.iter(|| black_box(&transcript).recompute())
    });
}

fn bench_score_edit(c: &mut Criterion) {
    let mut transcript = populated_transcript(1, 1);
    let semester_id = transcript.semesters()[0].id();
    let course_id = transcript.semesters()[0].courses()[0].id();
    c.bench_function("score_edit", |b| {
        let mut score = 0.0;
        b.iter(|| {
            score = (score + 0.25) % 100.0;
            if let Some(course) = transcript
                .semester_mut(semester_id)
                .and_then(|semester| semester.course_mut(course_id))
            {
                course.set_score(Some(black_box(score))).ok();
            }
            transcript.recompute()
        })
    });
}

criterion_group!(benches, bench_recompute, bench_score_edit);
criterion_main!(benches);
