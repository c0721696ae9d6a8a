use criterion::{black_box, criterion_group, criterion_main, Criterion};
use phishing_detector::{Classifier, MultinomialNB, TfidfVectorizer};

const WORDS: &[&str] = &[
    "verify", "account", "password", "urgent", "click", "here", "bank", "prize", "meeting",
    "lunch", "review", "report", "project", "invoice", "login", "security", "team", "draft",
];

fn synthetic_corpus(n_docs: usize, doc_len: usize) -> (Vec<String>, Vec<usize>) {
    let docs = (0..n_docs)
        .map(|d| {
            (0..doc_len)
                .map(|w| WORDS[(d * 7 + w * 13) % WORDS.len()])
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect();
    let labels = (0..n_docs).map(|d| d % 2).collect();
    (docs, labels)
}

fn bench_vectorizer(c: &mut Criterion) {
    let (docs, _) = synthetic_corpus(1000, 40);

    c.bench_function("tfidf_fit_transform_1000", |b| {
        b.iter(|| {
            let mut vectorizer = TfidfVectorizer::new();
            vectorizer.fit_transform(black_box(&docs)).unwrap()
        })
    });
}

fn bench_naive_bayes(c: &mut Criterion) {
    let (docs, labels) = synthetic_corpus(1000, 40);
    let mut vectorizer = TfidfVectorizer::new();
    let rows = vectorizer.fit_transform(&docs).unwrap();
    let n_features = vectorizer.vocabulary_size();

    c.bench_function("multinomial_nb_fit_1000", |b| {
        b.iter(|| {
            let mut model = MultinomialNB::new();
            model
                .fit(black_box(&rows), black_box(&labels), n_features, 2)
                .unwrap();
            model
        })
    });

    let mut model = MultinomialNB::new();
    model.fit(&rows, &labels, n_features, 2).unwrap();

    c.bench_function("multinomial_nb_predict_1000", |b| {
        b.iter(|| model.predict_batch(black_box(&rows)))
    });
}

criterion_group!(benches, bench_vectorizer, bench_naive_bayes);
criterion_main!(benches);
