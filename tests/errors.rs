use rebatch::{connect, identity, run_round, Error, Layout};

#[test]
fn empty_pool_cannot_host_a_round() {
    let batches: Vec<Vec<i32>> = Vec::new();
    assert!(matches!(
        run_round(batches, identity),
        Err(Error::EmptyPool)
    ));
    assert!(matches!(connect::<i32, f32>(0), Err(Error::EmptyPool)));
    assert!(matches!(Layout::balanced(10, 0), Err(Error::EmptyPool)));
}

#[test]
fn batch_disagreeing_with_declared_count_aborts() {
    let (hub, links) = connect::<i32, f32>(2).unwrap();
    links[0].report_count(3).unwrap();
    links[1].report_count(1).unwrap();
    let original = Layout::from_counts(hub.gather_counts().unwrap());

    links[0].send_batch(vec![1, 2]).unwrap();
    links[1].send_batch(vec![9]).unwrap();
    assert!(matches!(
        hub.gather_batches(&original),
        Err(Error::ShapeMismatch {
            expected: 3,
            actual: 2
        })
    ));
}

#[test]
fn layout_from_another_pool_aborts() {
    let (hub, _links) = connect::<i32, f32>(3).unwrap();
    let narrow = Layout::from_counts(vec![2, 2]);
    assert!(matches!(
        hub.scatter_shares(&narrow),
        Err(Error::RankMismatch {
            expected: 3,
            actual: 2
        })
    ));
}

#[test]
fn departed_worker_fails_the_collect() {
    let (hub, mut links) = connect::<i32, f32>(3).unwrap();
    links[0].report_count(1).unwrap();
    links[2].report_count(2).unwrap();
    drop(links.remove(1));

    assert!(matches!(
        hub.gather_counts(),
        Err(Error::RankLost { rank: 1 })
    ));
}

#[test]
fn departed_coordinator_fails_the_worker() {
    let (hub, links) = connect::<i32, f32>(2).unwrap();
    drop(hub);

    assert!(matches!(
        links[0].report_count(4),
        Err(Error::CoordinatorLost)
    ));
    assert!(matches!(links[1].recv_share(), Err(Error::CoordinatorLost)));
}

#[test]
fn wrong_phase_message_aborts() {
    let (hub, links) = connect::<i32, f32>(1).unwrap();
    links[0].send_batch(vec![7]).unwrap();
    assert!(matches!(
        hub.gather_counts(),
        Err(Error::OutOfPhase {
            rank: 0,
            expected: "count",
            ..
        })
    ));
}

#[test]
fn panicking_transform_fails_the_whole_round() {
    let batches = vec![vec![1], vec![2], vec![3]];
    let result = run_round(batches, |item: &i32| {
        if *item == 2 {
            panic!("worker gave up");
        }
        *item
    });
    assert!(matches!(result, Err(Error::RankLost { .. })));
}
