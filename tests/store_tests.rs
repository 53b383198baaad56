use std::fs;
use std::sync::Arc;

use tempfile::tempdir;
use viewwear::{Category, Garment, GarmentStore};

fn garment(id: &str, name: &str, category: Category) -> Garment {
    Garment {
        id: id.to_owned(),
        name: name.to_owned(),
        category,
        image: format!("/garments/{}.png", id),
        is_custom: true,
    }
}

#[test]
fn missing_file_is_an_empty_catalog() {
    let dir = tempdir().unwrap();
    let store = GarmentStore::open(dir.path().join("garments.txt"));
    assert_eq!(store.list().unwrap(), vec![]);
}

#[test]
fn empty_file_is_an_empty_catalog() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("garments.txt");
    fs::write(&path, "").unwrap();
    let store = GarmentStore::open(&path);
    assert_eq!(store.list().unwrap(), vec![]);
}

#[test]
fn add_then_list_is_inclusive() {
    let dir = tempdir().unwrap();
    let store = GarmentStore::open(dir.path().join("garments.txt"));

    let g = garment("custom-1", "Red Hoodie", Category::Jackets);
    store.add(&g).unwrap();

    let listed = store.list().unwrap();
    assert!(listed.contains(&g));
}

#[test]
fn list_preserves_insertion_order() {
    let dir = tempdir().unwrap();
    let store = GarmentStore::open(dir.path().join("garments.txt"));

    let a = garment("a", "A", Category::Shirts);
    let b = garment("b", "B", Category::Pants);
    let c = garment("c", "C", Category::Shirts);
    store.add(&a).unwrap();
    store.add(&b).unwrap();
    store.add(&c).unwrap();

    assert_eq!(store.list().unwrap(), vec![a, b, c]);
}

#[test]
fn delete_removes_only_the_target() {
    let dir = tempdir().unwrap();
    let store = GarmentStore::open(dir.path().join("garments.txt"));

    let a = garment("a", "A", Category::Shirts);
    let b = garment("b", "B", Category::Pants);
    let c = garment("c", "C", Category::Shoes);
    for g in [&a, &b, &c] {
        store.add(g).unwrap();
    }

    assert!(store.delete_by_id("b").unwrap());
    assert_eq!(store.list().unwrap(), vec![a, c]);
}

#[test]
fn delete_of_unknown_id_reports_nothing_removed() {
    let dir = tempdir().unwrap();
    let store = GarmentStore::open(dir.path().join("garments.txt"));
    store.add(&garment("a", "A", Category::Shirts)).unwrap();

    assert!(!store.delete_by_id("nope").unwrap());
    assert_eq!(store.list().unwrap().len(), 1);
}

#[test]
fn category_filter_is_an_ordered_subsequence() {
    let dir = tempdir().unwrap();
    let store = GarmentStore::open(dir.path().join("garments.txt"));

    let a = garment("a", "A", Category::Shirts);
    let b = garment("b", "B", Category::Pants);
    let c = garment("c", "C", Category::Shirts);
    for g in [&a, &b, &c] {
        store.add(g).unwrap();
    }

    let shirts = store.filter_by_category(Category::Shirts).unwrap();
    assert_eq!(shirts, vec![a, c]);
    assert!(shirts.iter().all(|g| g.category == Category::Shirts));
}

#[test]
fn corrupt_line_is_skipped_not_fatal() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("garments.txt");
    let store = GarmentStore::open(&path);

    let a = garment("a", "A", Category::Shirts);
    let b = garment("b", "B", Category::Pants);
    store.add(&a).unwrap();

    // Inject a record that is not valid JSON between two good ones.
    let mut content = fs::read_to_string(&path).unwrap();
    content.push_str("{ this is not json\n");
    fs::write(&path, content).unwrap();
    store.add(&b).unwrap();

    assert_eq!(store.list().unwrap(), vec![a, b]);
}

#[test]
fn rewrite_keeps_the_line_format() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("garments.txt");
    let store = GarmentStore::open(&path);

    store.add(&garment("a", "A", Category::Shirts)).unwrap();
    store.add(&garment("b", "B", Category::Pants)).unwrap();
    store.delete_by_id("a").unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.ends_with('\n'));
    assert_eq!(content.lines().count(), 1);

    // Deleting the last record leaves an empty file, not a stray newline.
    store.delete_by_id("b").unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "");
}

#[test]
fn seed_defaults_only_fills_an_empty_store() {
    let dir = tempdir().unwrap();
    let store = GarmentStore::open(dir.path().join("garments.txt"));

    store.seed_defaults().unwrap();
    let seeded = store.list().unwrap();
    assert_eq!(seeded.len(), 8);
    for category in Category::ALL {
        assert_eq!(store.filter_by_category(category).unwrap().len(), 2);
    }

    store.add(&garment("custom-1", "Mine", Category::Shoes)).unwrap();
    store.seed_defaults().unwrap();
    assert_eq!(store.list().unwrap().len(), 9);
}

#[test]
fn interleaved_adds_and_unrelated_delete_lose_nothing() {
    let dir = tempdir().unwrap();
    let store = Arc::new(GarmentStore::open(dir.path().join("garments.txt")));
    store.add(&garment("victim", "Victim", Category::Shoes)).unwrap();

    let adder1 = {
        let store = store.clone();
        std::thread::spawn(move || store.add(&garment("t1", "T1", Category::Shirts)).unwrap())
    };
    let adder2 = {
        let store = store.clone();
        std::thread::spawn(move || store.add(&garment("t2", "T2", Category::Pants)).unwrap())
    };
    let deleter = {
        let store = store.clone();
        std::thread::spawn(move || store.delete_by_id("victim").unwrap())
    };
    adder1.join().unwrap();
    adder2.join().unwrap();
    deleter.join().unwrap();

    let ids: Vec<String> = store.list().unwrap().into_iter().map(|g| g.id).collect();
    assert!(ids.contains(&"t1".to_owned()));
    assert!(ids.contains(&"t2".to_owned()));
    assert!(!ids.contains(&"victim".to_owned()));
}
