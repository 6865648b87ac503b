//! Tests for the slot catalogue service.

use std::sync::Arc;

use super::*;
use crate::domain::ports::{AssetStorageError, MockAssetRepository, MockAssetStorage};
use crate::domain::test_fixtures::{asset_item, caller, fixture_clock, fixture_timestamp};
use crate::domain::{ErrorCode, RankChange, Role, UploadedFile};
use mockall::predicate::eq;
use rstest::rstest;

fn make_service(
    repo: MockAssetRepository,
    storage: MockAssetStorage,
) -> AssetCatalogueService<MockAssetRepository, MockAssetStorage> {
    AssetCatalogueService::new(Arc::new(repo), Arc::new(storage), fixture_clock())
}

fn png_upload() -> AssetUploadRequest {
    AssetUploadRequest {
        name: Some("smile".to_owned()),
        file: Some(UploadedFile::new(
            Some("smile.png".to_owned()),
            vec![0x89, b'P', b'N', b'G'],
        )),
        ..AssetUploadRequest::default()
    }
}

fn stored_from(draft: &NewAsset, id: i32) -> AssetItem {
    AssetItem {
        id: AssetId::new(id),
        kind: draft.kind,
        name: draft.name.as_str().to_owned(),
        asset_path: draft.asset_path.clone(),
        deleted: false,
        deleted_at: None,
        sort_order: draft.sort_order,
        placement: draft.placement,
        created_at: draft.created_at,
    }
}

#[tokio::test]
async fn list_returns_repository_rows() {
    let mut repo = MockAssetRepository::new();
    repo.expect_list_visible()
        .with(eq(AssetKind::Costume))
        .times(1)
        .return_once(|_| {
            Ok(vec![
                asset_item(AssetKind::Costume, 2, 1),
                asset_item(AssetKind::Costume, 1, 2),
            ])
        });

    let service = make_service(repo, MockAssetStorage::new());
    let items = service.list(AssetKind::Costume).await.expect("list succeeds");

    let ids: Vec<i32> = items.iter().map(|item| item.id.get()).collect();
    assert_eq!(ids, vec![2, 1]);
}

#[tokio::test]
async fn get_reports_missing_rows_as_not_found() {
    let mut repo = MockAssetRepository::new();
    repo.expect_find_visible().return_once(|_, _| Ok(None));

    let service = make_service(repo, MockAssetStorage::new());
    let err = service
        .get(AssetKind::FrontHair, AssetId::new(9))
        .await
        .expect_err("row missing");

    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "front hair 9 not found");
}

#[tokio::test]
async fn upload_on_empty_catalogue_assigns_rank_one_and_defaults() {
    let mut repo = MockAssetRepository::new();
    let mut storage = MockAssetStorage::new();
    let expected_name = format!("{}.png", fixture_timestamp().timestamp_millis());

    repo.expect_max_sort_order()
        .with(eq(AssetKind::Face))
        .return_once(|_| Ok(None));
    storage
        .expect_store()
        .withf(move |dir, name, bytes| dir == "face" && name == expected_name && !bytes.is_empty())
        .times(1)
        .returning(|dir, name, _| Ok(format!("/uploads/{dir}/{name}")));
    repo.expect_insert()
        .times(1)
        .returning(|draft| Ok(stored_from(draft, 1)));

    let service = make_service(repo, storage);
    let item = service
        .upload(&caller(Role::GameMaster), AssetKind::Face, png_upload())
        .await
        .expect("upload succeeds");

    assert_eq!(item.sort_order, 1);
    assert_eq!(item.placement, Placement::DEFAULT);
    assert!(item.asset_path.starts_with("/uploads/face/"));
}

#[tokio::test]
async fn upload_ranks_after_the_highest_existing_rank() {
    let mut repo = MockAssetRepository::new();
    let mut storage = MockAssetStorage::new();
    repo.expect_max_sort_order().return_once(|_| Ok(Some(7)));
    storage
        .expect_store()
        .returning(|dir, name, _| Ok(format!("/uploads/{dir}/{name}")));
    repo.expect_insert()
        .withf(|draft| draft.sort_order == 8)
        .returning(|draft| Ok(stored_from(draft, 12)));

    let service = make_service(repo, storage);
    let item = service
        .upload(&caller(Role::SystemAdmin), AssetKind::Background, png_upload())
        .await
        .expect("upload succeeds");

    assert_eq!(item.sort_order, 8);
}

#[tokio::test]
async fn upload_keeps_explicit_geometry() {
    let mut repo = MockAssetRepository::new();
    let mut storage = MockAssetStorage::new();
    repo.expect_max_sort_order().return_once(|_| Ok(None));
    storage
        .expect_store()
        .returning(|dir, name, _| Ok(format!("/uploads/{dir}/{name}")));
    repo.expect_insert()
        .returning(|draft| Ok(stored_from(draft, 1)));

    let request = AssetUploadRequest {
        offset_x: Some("10".to_owned()),
        offset_y: Some("20".to_owned()),
        width: Some("100".to_owned()),
        height: Some("150".to_owned()),
        ..png_upload()
    };
    let service = make_service(repo, storage);
    let item = service
        .upload(&caller(Role::GameMaster), AssetKind::FrontHair, request)
        .await
        .expect("upload succeeds");

    assert_eq!(
        item.placement,
        Placement {
            offset_x: 10,
            offset_y: 20,
            width: 100,
            height: 150,
        }
    );
}

#[rstest]
#[case::offset_too_large(Some("1001"), None, "offsetX")]
#[case::zero_width(None, Some("0"), "width")]
#[case::fractional_offset(Some("1.5"), None, "offsetX")]
#[tokio::test]
async fn upload_rejects_bad_geometry_before_touching_storage(
    #[case] offset_x: Option<&str>,
    #[case] width: Option<&str>,
    #[case] field: &str,
) {
    let request = AssetUploadRequest {
        offset_x: offset_x.map(str::to_owned),
        width: width.map(str::to_owned),
        ..png_upload()
    };
    // Strict mocks: any repository or storage call fails the test.
    let service = make_service(MockAssetRepository::new(), MockAssetStorage::new());
    let err = service
        .upload(&caller(Role::GameMaster), AssetKind::FrontHair, request)
        .await
        .expect_err("geometry rejected");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        err.details()
            .and_then(|d| d.get("field"))
            .and_then(|f| f.as_str()),
        Some(field)
    );
}

#[tokio::test]
async fn upload_treats_blank_geometry_as_absent() {
    let mut repo = MockAssetRepository::new();
    let mut storage = MockAssetStorage::new();
    repo.expect_max_sort_order().return_once(|_| Ok(None));
    storage
        .expect_store()
        .returning(|dir, name, _| Ok(format!("/uploads/{dir}/{name}")));
    repo.expect_insert()
        .withf(|draft| draft.placement == Placement::DEFAULT)
        .returning(|draft| Ok(stored_from(draft, 1)));

    let request = AssetUploadRequest {
        width: Some("  ".to_owned()),
        ..png_upload()
    };
    let service = make_service(repo, storage);
    service
        .upload(&caller(Role::GameMaster), AssetKind::Costume, request)
        .await
        .expect("blank fields fall back to defaults");
}

#[tokio::test]
async fn upload_requires_a_file() {
    let request = AssetUploadRequest {
        file: None,
        ..png_upload()
    };
    let service = make_service(MockAssetRepository::new(), MockAssetStorage::new());
    let err = service
        .upload(&caller(Role::GameMaster), AssetKind::Face, request)
        .await
        .expect_err("file missing");

    assert_eq!(err.message(), "asset file is required");
}

#[tokio::test]
async fn upload_is_forbidden_for_plain_users() {
    let service = make_service(MockAssetRepository::new(), MockAssetStorage::new());
    let err = service
        .upload(&caller(Role::User), AssetKind::Face, png_upload())
        .await
        .expect_err("users cannot upload");

    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn upload_discards_file_when_insert_fails() {
    let mut repo = MockAssetRepository::new();
    let mut storage = MockAssetStorage::new();
    repo.expect_max_sort_order().return_once(|_| Ok(None));
    storage
        .expect_store()
        .returning(|dir, name, _| Ok(format!("/uploads/{dir}/{name}")));
    repo.expect_insert()
        .return_once(|_| Err(AssetRepositoryError::connection("pool closed")));
    storage
        .expect_remove()
        .withf(|path| path.starts_with("/uploads/face/"))
        .times(1)
        .return_once(|_| Ok(()));

    let service = make_service(repo, storage);
    let err = service
        .upload(&caller(Role::GameMaster), AssetKind::Face, png_upload())
        .await
        .expect_err("insert failed");

    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}

#[tokio::test]
async fn soft_delete_marks_row_then_removes_file() {
    let mut repo = MockAssetRepository::new();
    let mut storage = MockAssetStorage::new();
    repo.expect_find_visible()
        .return_once(|kind, id| Ok(Some(asset_item(kind, id.get(), 1))));
    repo.expect_mark_deleted()
        .withf(|kind, id, at| {
            *kind == AssetKind::BackHair && id.get() == 4 && *at == fixture_timestamp()
        })
        .times(1)
        .return_once(|_, _, _| Ok(true));
    storage
        .expect_remove()
        .withf(|path| path == "/uploads/back-hair/4.png")
        .times(1)
        .return_once(|_| Ok(()));

    let service = make_service(repo, storage);
    service
        .soft_delete(&caller(Role::GameMaster), AssetKind::BackHair, AssetId::new(4))
        .await
        .expect("delete succeeds");
}

#[tokio::test]
async fn soft_delete_survives_file_removal_failure() {
    let mut repo = MockAssetRepository::new();
    let mut storage = MockAssetStorage::new();
    repo.expect_find_visible()
        .return_once(|kind, id| Ok(Some(asset_item(kind, id.get(), 1))));
    repo.expect_mark_deleted().return_once(|_, _, _| Ok(true));
    storage
        .expect_remove()
        .return_once(|_| Err(AssetStorageError::io("read-only filesystem")));

    let service = make_service(repo, storage);
    service
        .soft_delete(&caller(Role::SystemAdmin), AssetKind::Face, AssetId::new(1))
        .await
        .expect("file failures do not block the delete");
}

#[tokio::test]
async fn soft_delete_of_hidden_row_is_not_found() {
    let mut repo = MockAssetRepository::new();
    repo.expect_find_visible().return_once(|_, _| Ok(None));

    let service = make_service(repo, MockAssetStorage::new());
    let err = service
        .soft_delete(&caller(Role::GameMaster), AssetKind::Face, AssetId::new(1))
        .await
        .expect_err("already deleted");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn soft_delete_losing_a_race_is_not_found() {
    let mut repo = MockAssetRepository::new();
    repo.expect_find_visible()
        .return_once(|kind, id| Ok(Some(asset_item(kind, id.get(), 1))));
    repo.expect_mark_deleted().return_once(|_, _, _| Ok(false));

    let service = make_service(repo, MockAssetStorage::new());
    let err = service
        .soft_delete(&caller(Role::GameMaster), AssetKind::Face, AssetId::new(1))
        .await
        .expect_err("another request deleted it first");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

fn reorder_repo(rows: Vec<AssetItem>) -> MockAssetRepository {
    let mut repo = MockAssetRepository::new();
    let lookup = rows.clone();
    repo.expect_find_visible().returning(move |_, id| {
        Ok(lookup.iter().find(|item| item.id == id).cloned())
    });
    repo.expect_list_visible()
        .returning(move |_| Ok(rows.clone()));
    repo
}

#[tokio::test]
async fn reorder_down_swaps_with_successor() {
    let mut repo = reorder_repo(vec![
        asset_item(AssetKind::Face, 1, 1),
        asset_item(AssetKind::Face, 2, 2),
    ]);
    repo.expect_apply_ranks()
        .with(
            eq(AssetKind::Face),
            eq(vec![
                RankChange::new(RankedSlot::new(AssetId::new(1), 1), 2),
                RankChange::new(RankedSlot::new(AssetId::new(2), 2), 1),
            ]),
        )
        .times(1)
        .return_once(|_, _| Ok(()));

    let service = make_service(repo, MockAssetStorage::new());
    let outcome = service
        .reorder(
            &caller(Role::GameMaster),
            AssetKind::Face,
            AssetId::new(1),
            MoveDirection::Down,
        )
        .await
        .expect("reorder succeeds");

    assert_eq!(outcome, ReorderOutcome::Moved);
}

#[tokio::test]
async fn reorder_separates_tied_ranks() {
    let mut repo = reorder_repo(vec![
        asset_item(AssetKind::Face, 1, 3),
        asset_item(AssetKind::Face, 2, 3),
    ]);
    repo.expect_apply_ranks()
        .with(
            eq(AssetKind::Face),
            eq(vec![RankChange::new(RankedSlot::new(AssetId::new(1), 3), 4)]),
        )
        .times(1)
        .return_once(|_, _| Ok(()));

    let service = make_service(repo, MockAssetStorage::new());
    let outcome = service
        .reorder(
            &caller(Role::SystemAdmin),
            AssetKind::Face,
            AssetId::new(2),
            MoveDirection::Up,
        )
        .await
        .expect("tied move succeeds");

    assert_eq!(outcome, ReorderOutcome::Moved);
}

#[rstest]
#[case(1, MoveDirection::Up)]
#[case(3, MoveDirection::Down)]
#[tokio::test]
async fn reorder_at_edge_changes_nothing(#[case] id: i32, #[case] direction: MoveDirection) {
    let repo = reorder_repo(vec![
        asset_item(AssetKind::Costume, 1, 1),
        asset_item(AssetKind::Costume, 2, 4),
        asset_item(AssetKind::Costume, 3, 9),
    ]);

    let service = make_service(repo, MockAssetStorage::new());
    let outcome = service
        .reorder(
            &caller(Role::SystemAdmin),
            AssetKind::Costume,
            AssetId::new(id),
            direction,
        )
        .await
        .expect("edge move succeeds");

    assert_eq!(outcome, ReorderOutcome::AtEdge);
}

#[tokio::test]
async fn reorder_reports_concurrent_rank_change_as_conflict() {
    let mut repo = reorder_repo(vec![
        asset_item(AssetKind::Background, 5, 1),
        asset_item(AssetKind::Background, 6, 2),
    ]);
    repo.expect_apply_ranks()
        .return_once(|_, _| Err(AssetRepositoryError::rank_conflict(6)));

    let service = make_service(repo, MockAssetStorage::new());
    let err = service
        .reorder(
            &caller(Role::GameMaster),
            AssetKind::Background,
            AssetId::new(6),
            MoveDirection::Up,
        )
        .await
        .expect_err("swap lost the race");

    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[tokio::test]
async fn reorder_of_missing_row_is_not_found() {
    let repo = reorder_repo(vec![asset_item(AssetKind::Face, 1, 1)]);

    let service = make_service(repo, MockAssetStorage::new());
    let err = service
        .reorder(
            &caller(Role::GameMaster),
            AssetKind::Face,
            AssetId::new(42),
            MoveDirection::Up,
        )
        .await
        .expect_err("row missing");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn reorder_is_forbidden_for_plain_users() {
    let service = make_service(MockAssetRepository::new(), MockAssetStorage::new());
    let err = service
        .reorder(
            &caller(Role::User),
            AssetKind::Face,
            AssetId::new(1),
            MoveDirection::Up,
        )
        .await
        .expect_err("users cannot reorder");

    assert_eq!(err.code(), ErrorCode::Forbidden);
}
