use storefront_core::db::open_db_in_memory;
use storefront_core::{
    Catalog, Category, CategoryDraft, Inventory, InventoryDraft, MemoryCatalog, Product,
    ProductDraft, ProductFilter, ProductPatch, RecordStore, ResourceKind, ServiceError,
    SqliteCatalog,
};
use uuid::Uuid;

macro_rules! on_both_backends {
    ($memory:ident, $sqlite:ident, $scenario:ident) => {
        #[test]
        fn $memory() {
            $scenario(&mut MemoryCatalog::in_memory());
        }

        #[test]
        fn $sqlite() {
            let conn = open_db_in_memory().unwrap();
            $scenario(&mut SqliteCatalog::sqlite(&conn).unwrap());
        }
    };
}

on_both_backends!(category_link_memory, category_link_sqlite, category_link_lifecycle);
on_both_backends!(no_link_memory, no_link_sqlite, product_without_links);
on_both_backends!(missing_product_memory, missing_product_sqlite, missing_product);
on_both_backends!(inventory_link_memory, inventory_link_sqlite, inventory_link);
on_both_backends!(no_cascade_memory, no_cascade_sqlite, deletes_do_not_cascade);

fn category_link_lifecycle<P, C, I>(catalog: &mut Catalog<P, C, I>)
where
    P: RecordStore<Product>,
    C: RecordStore<Category>,
    I: RecordStore<Inventory>,
{
    let tools = catalog.categories.create(CategoryDraft::new("Tools")).unwrap();
    let hammer = catalog
        .products
        .create(ProductDraft {
            category_id: Some(tools.category_id),
            ..ProductDraft::new("Hammer", 15.0)
        })
        .unwrap();

    assert_eq!(catalog.product_category(hammer.product_id).unwrap(), tools);

    catalog.categories.delete(tools.category_id).unwrap();

    let err = catalog.product_category(hammer.product_id).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::LinkedRecordMissing { product_id, target: ResourceKind::Category, target_id }
            if product_id == hammer.product_id && target_id == tools.category_id
    ));
    assert_eq!(err.status_code(), 404);
    assert_eq!(err.detail(), "Linked category not found");

    // The product keeps its dangling reference.
    let hammer = catalog.products.get(hammer.product_id).unwrap();
    assert_eq!(hammer.category_id, Some(tools.category_id));
}

fn product_without_links<P, C, I>(catalog: &mut Catalog<P, C, I>)
where
    P: RecordStore<Product>,
    C: RecordStore<Category>,
    I: RecordStore<Inventory>,
{
    catalog.categories.create(CategoryDraft::new("Tools")).unwrap();
    let widget = catalog
        .products
        .create(ProductDraft::new("Widget", 9.99))
        .unwrap();

    let err = catalog.product_category(widget.product_id).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::NoLinkedRecord { target: ResourceKind::Category, .. }
    ));
    assert_eq!(err.detail(), "This product has no linked category record");

    let err = catalog.product_inventory(widget.product_id).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::NoLinkedRecord { target: ResourceKind::Inventory, .. }
    ));
    assert_eq!(err.status_code(), 404);
}

fn missing_product<P, C, I>(catalog: &mut Catalog<P, C, I>)
where
    P: RecordStore<Product>,
    C: RecordStore<Category>,
    I: RecordStore<Inventory>,
{
    let missing = Uuid::new_v4();

    let err = catalog.product_category(missing).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::NotFound { resource: ResourceKind::Product, id } if id == missing
    ));
    assert_eq!(err.detail(), "Product not found");

    let err = catalog.product_inventory(missing).unwrap_err();
    assert_eq!(err.detail(), "Product not found");
}

fn inventory_link<P, C, I>(catalog: &mut Catalog<P, C, I>)
where
    P: RecordStore<Product>,
    C: RecordStore<Category>,
    I: RecordStore<Inventory>,
{
    let mouse = catalog
        .products
        .create(ProductDraft::new("Wireless Mouse", 29.99))
        .unwrap();
    let stock = catalog
        .inventories
        .create(InventoryDraft {
            warehouse_location: Some("Warehouse A".to_string()),
            ..InventoryDraft::new(mouse.product_id, 320)
        })
        .unwrap();

    // Inventory pointing back at the product is not enough.
    assert!(matches!(
        catalog.product_inventory(mouse.product_id).unwrap_err(),
        ServiceError::NoLinkedRecord { .. }
    ));

    catalog
        .products
        .update(
            mouse.product_id,
            &ProductPatch {
                inventory_id: Some(Some(stock.inventory_id)),
                ..ProductPatch::default()
            },
        )
        .unwrap();

    assert_eq!(catalog.product_inventory(mouse.product_id).unwrap(), stock);

    catalog.inventories.delete(stock.inventory_id).unwrap();
    let err = catalog.product_inventory(mouse.product_id).unwrap_err();
    assert_eq!(err.detail(), "Linked inventory not found");
}

fn deletes_do_not_cascade<P, C, I>(catalog: &mut Catalog<P, C, I>)
where
    P: RecordStore<Product>,
    C: RecordStore<Category>,
    I: RecordStore<Inventory>,
{
    let tools = catalog.categories.create(CategoryDraft::new("Tools")).unwrap();
    let hammer = catalog
        .products
        .create(ProductDraft {
            category_id: Some(tools.category_id),
            ..ProductDraft::new("Hammer", 15.0)
        })
        .unwrap();
    let stock = catalog
        .inventories
        .create(InventoryDraft::new(hammer.product_id, 10))
        .unwrap();

    catalog.products.delete(hammer.product_id).unwrap();

    assert_eq!(catalog.categories.get(tools.category_id).unwrap(), tools);
    assert_eq!(catalog.inventories.get(stock.inventory_id).unwrap(), stock);

    let summary = catalog.summary().unwrap();
    assert_eq!(summary.products, 0);
    assert_eq!(summary.categories, 1);
    assert_eq!(summary.inventories, 1);

    let remaining = catalog
        .products
        .list(&ProductFilter {
            category_id: Some(tools.category_id),
            ..ProductFilter::default()
        })
        .unwrap();
    assert!(remaining.is_empty());
}
