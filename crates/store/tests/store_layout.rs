use fixup_store::{ActId, FixupEntry, FixupStore, RecordScanner};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

fn entries(yaml: &str) -> Vec<FixupEntry> {
    serde_yaml::from_str(yaml).unwrap()
}

fn discovered(store: &FixupStore) -> Vec<String> {
    RecordScanner::new(store.root())
        .scan()
        .map(|act| act.unwrap().to_string())
        .collect()
}

#[test]
fn saved_records_are_discovered_and_deleted_ones_are_not() {
    let temp = tempdir().unwrap();
    let store = FixupStore::new(temp.path().join("fixups"));
    let first = ActId::new("2013. évi V. törvény").unwrap();
    let second = ActId::new("2013. évi CCXXX. törvény").unwrap();

    store.save(&first, &entries("- old: a\n  new: b\n")).unwrap();
    store.save(&second, &entries("- old: c\n  new: d\n")).unwrap();
    assert_eq!(
        discovered(&store),
        vec!["2013. évi CCXXX. törvény", "2013. évi V. törvény"]
    );

    store.save(&second, &[]).unwrap();
    assert_eq!(discovered(&store), vec!["2013. évi V. törvény"]);
    assert!(temp
        .path()
        .join("fixups/2013/2013. évi V. törvény.yml")
        .is_file());
}

#[test]
fn rewriting_a_record_keeps_unknown_fields() {
    let temp = tempdir().unwrap();
    let store = FixupStore::new(temp.path());
    let act = ActId::new("2016.4").unwrap();
    let original = entries(
        "- after:\n  - \"1. §\"\n  old: Ez a törvény\n  new: Ez a  törvény\n  comment: kept\n\
         - 42\n",
    );

    store.save(&act, &original).unwrap();
    let reloaded = store.load(&act).unwrap();
    store.save(&act, &reloaded[1..]).unwrap();

    assert_eq!(store.load(&act).unwrap(), original[1..].to_vec());
    assert_eq!(reloaded[0].value()["comment"], "kept");
}
