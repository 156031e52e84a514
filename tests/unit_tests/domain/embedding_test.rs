use pagewise::domain::Embedding;

#[test]
fn given_embedding_when_checking_dimensions_then_returns_correct_size() {
    let embedding = Embedding::new(vec![0.1, 0.2, 0.3]);
    assert_eq!(embedding.dimensions(), 3);
}

#[test]
fn given_three_four_vector_when_computing_magnitude_then_returns_five() {
    let embedding = Embedding::new(vec![3.0, 4.0]);
    assert!((embedding.magnitude() - 5.0).abs() < 1e-6);
}

#[test]
fn given_zero_vector_when_computing_magnitude_then_returns_zero() {
    let embedding = Embedding::new(vec![0.0, 0.0, 0.0]);
    assert_eq!(embedding.magnitude(), 0.0);
}
