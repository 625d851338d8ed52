//! Integration tests for the shared spam manager

use spam_rs::config::Config;
use spam_rs::spam::{Label, SpamManager, Verdict};
use spam_rs::SpamError;
use std::io::Write;
use tempfile::TempDir;

fn manager() -> SpamManager {
    SpamManager::new(&Config::default())
}

#[tokio::test]
async fn test_untrained_manager() {
    let manager = manager();

    let result = manager.classify("win free money").await.unwrap();
    assert_eq!(result.probability, 0.5);
    assert_eq!(result.verdict, Verdict::Uncertain);

    assert!(matches!(
        manager.ensure_trained().await,
        Err(SpamError::NoTrainingData)
    ));
}

#[tokio::test]
async fn test_train_and_classify() {
    let manager = manager();
    manager
        .learn_spam("win free money now click here urgent")
        .await
        .unwrap();
    manager
        .learn_ham("meeting scheduled for tomorrow please attend")
        .await
        .unwrap();

    manager.ensure_trained().await.unwrap();
    assert!(manager.classify("win free money").await.unwrap().probability > 0.5);
    assert!(manager.classify("meeting tomorrow").await.unwrap().probability < 0.5);
}

#[tokio::test]
async fn test_input_too_long_leaves_model_untouched() {
    let mut config = Config::default();
    config.limits.max_document_length = 20;
    let manager = SpamManager::new(&config);

    let long = "free money ".repeat(10);
    let err = manager.train(&long, Label::Spam).await.unwrap_err();
    assert!(matches!(err, SpamError::InputTooLong { max: 20, .. }));
    assert_eq!(manager.stats().await.total_spam_emails, 0);
    assert_eq!(manager.stats().await.vocabulary_size, 0);

    assert!(matches!(
        manager.classify(&long).await,
        Err(SpamError::InputTooLong { .. })
    ));
}

#[tokio::test]
async fn test_save_and_restore_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("model.txt");

    let original = manager();
    original.train_defaults().await;
    original.learn_spam("cheap pills cheap pills").await.unwrap();
    let saved = original.save(&path).await.unwrap();

    let restored = manager();
    restored.learn_ham("something to be replaced").await.unwrap();
    let loaded = restored.restore(&path).await.unwrap();

    assert_eq!(saved, loaded);
    assert_eq!(original.stats().await, restored.stats().await);
    for text in ["cheap pills today", "family dinner", "claim your prize"] {
        let a = original.classify(text).await.unwrap().probability;
        let b = restored.classify(text).await.unwrap().probability;
        assert_eq!(a, b);
    }
}

#[tokio::test]
async fn test_restore_failure_keeps_model() {
    let dir = TempDir::new().unwrap();
    let manager = manager();
    manager.train_defaults().await;
    let before = manager.stats().await;

    let err = manager
        .restore(&dir.path().join("missing.txt"))
        .await
        .unwrap_err();
    assert!(matches!(err, SpamError::FileUnavailable { .. }));
    assert_eq!(manager.stats().await, before);

    let bad = dir.path().join("bad.txt");
    std::fs::write(&bad, "1 1 2 0\nfree 2 0\nbroken line here\n").unwrap();
    let err = manager.restore(&bad).await.unwrap_err();
    assert!(matches!(err, SpamError::MalformedModel { line: 3, .. }));
    assert_eq!(manager.stats().await, before);
}

#[tokio::test]
async fn test_restore_recomputes_word_totals() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("edited.txt");
    std::fs::write(&path, "2 1 100 100\nfree 3 0\nmoney 1 0\nmeeting 0 2\n").unwrap();

    let manager = manager();
    let stats = manager.restore(&path).await.unwrap();
    assert_eq!(stats.total_spam_emails, 2);
    assert_eq!(stats.total_ham_emails, 1);
    assert_eq!(stats.total_spam_words, 4);
    assert_eq!(stats.total_ham_words, 2);
    assert_eq!(stats.vocabulary_size, 3);
}

#[tokio::test]
async fn test_load_training_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("train.txt");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "1 win free money now click here urgent").unwrap();
    writeln!(file, "0 meeting scheduled for tomorrow please attend").unwrap();
    writeln!(file, "1 claim your free gift now").unwrap();
    writeln!(file, "0").unwrap();
    writeln!(file).unwrap();
    drop(file);

    let manager = manager();
    let report = manager.load_training_file(&path).await.unwrap();
    assert_eq!(report.loaded, 3);
    assert_eq!(report.skipped, 2);
    assert_eq!(report.spam, 2);
    assert_eq!(report.ham, 1);

    let stats = manager.stats().await;
    assert_eq!(stats.total_spam_emails, 2);
    assert_eq!(stats.total_ham_emails, 1);
}

#[tokio::test]
async fn test_load_training_file_with_latin1_bytes() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("latin1.txt");
    std::fs::write(
        &path,
        b"1 win free money now\n0 meeting tomorrow\n1 caf\xe9 prize claim\n",
    )
    .unwrap();

    let manager = manager();
    let report = manager.load_training_file(&path).await.unwrap();
    assert_eq!(report.loaded, 3);
    assert_eq!(report.skipped, 0);
    assert_eq!(manager.stats().await.total_spam_emails, 2);
}

#[tokio::test]
async fn test_restore_rejects_overflowing_counts() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("overflow.txt");
    std::fs::write(&path, "1 1 0 0\nfree 18446744073709551615 0\nmoney 1 0\n").unwrap();

    let manager = manager();
    manager.train_defaults().await;
    let before = manager.stats().await;

    let err = manager.restore(&path).await.unwrap_err();
    assert!(matches!(err, SpamError::MalformedModel { line: 3, .. }));
    assert_eq!(manager.stats().await, before);
}

#[tokio::test]
async fn test_load_missing_training_file() {
    let dir = TempDir::new().unwrap();
    let manager = manager();
    manager.train_defaults().await;
    let before = manager.stats().await;

    let err = manager
        .load_training_file(&dir.path().join("absent.txt"))
        .await
        .unwrap_err();
    assert!(matches!(err, SpamError::FileUnavailable { .. }));
    assert_eq!(manager.stats().await, before);
}

#[tokio::test]
async fn test_evaluate_default_suite() {
    let manager = manager();
    manager.train_defaults().await;

    let report = manager.evaluate().await;
    assert_eq!(report.correct, report.total);
}

#[tokio::test]
async fn test_reset() {
    let manager = manager();
    manager.train_defaults().await;
    manager.reset().await;

    assert_eq!(manager.stats().await, Default::default());
    assert!(manager.ensure_trained().await.is_err());
}

#[tokio::test]
async fn test_concurrent_readers_and_writer() {
    let manager = manager();
    manager.train_defaults().await;

    let mut handles = Vec::new();
    for i in 0..8 {
        let manager = manager.clone();
        handles.push(tokio::spawn(async move {
            if i % 2 == 0 {
                manager.learn_spam("limited offer free money").await.unwrap();
            }
            manager.classify("free money offer").await.unwrap().probability
        }));
    }

    for handle in handles {
        let p = handle.await.unwrap();
        assert!(p > 0.5);
    }

    let stats = manager.stats().await;
    assert_eq!(stats.total_spam_emails, 7 + 4);
}
