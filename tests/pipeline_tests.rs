use sqlnode::ast::{Expr, FromTable, Node, Statement, TableReferenceLike};
use sqlnode::errors::{CursorResolutionError, SqlError, SqlResult};
use sqlnode::execution::{Executor, InMemoryCursorRegistry, RowLocation};
use sqlnode::frontend;
use sqlnode::pipeline::{Phase, StatementTree};
use sqlnode::semantic::{Binder, CursorReferenceCollector};

fn bind(source: &str) -> SqlResult<StatementTree> {
    let statement = frontend::parse(source)?.remove(0);
    Binder::new().bind(StatementTree::new(statement))
}

#[test]
fn test_positioned_update_binds_to_one_cursor_reference() -> SqlResult<()> {
    let tree = bind("UPDATE t SET x=1 WHERE CURRENT OF cur1")?;
    assert_eq!(tree.phase(), Phase::Bound);

    let cursors = CursorReferenceCollector::collect(tree.root())?;
    assert_eq!(cursors, vec!["cur1".to_string()]);

    let source = tree.root().source().expect("bound update has a row source");
    assert!(matches!(source.from_list(), [FromTable::CurrentOf(_)]));
    let last = source.result_columns().last().expect("row location column");
    assert_eq!(last.expression().expr(), &Expr::RowLocation);
    Ok(())
}

#[test]
fn test_searched_delete_reads_the_base_table() -> SqlResult<()> {
    let tree = bind("DELETE FROM t AS a WHERE id = 3")?;
    assert!(CursorReferenceCollector::collect(tree.root())?.is_empty());
    let source = tree.root().source().expect("bound delete has a row source");
    assert_eq!(source.from_list()[0].exposed_name(), Some("a"));
    assert!(source.where_clause().is_some());
    assert_eq!(source.result_columns().len(), 1);
    Ok(())
}

#[test]
fn test_closed_cursor_fails_the_statement() -> SqlResult<()> {
    let tree = bind("UPDATE t SET x=1 WHERE CURRENT OF cur1")?;
    let mut registry = InMemoryCursorRegistry::new();
    registry.open("cur1", vec![RowLocation(7)]);
    registry.fetch_next("cur1")?;
    registry.close("cur1")?;

    let result = Executor::new(&registry).execute(tree);
    match result {
        Err(SqlError::CursorResolution(CursorResolutionError::NotOpen(name))) => {
            assert_eq!(name, "cur1")
        }
        other => panic!("Expected a cursor resolution failure, got {:?}", other),
    }
    Ok(())
}

#[test]
fn test_unpositioned_cursor_fails_the_statement() -> SqlResult<()> {
    let tree = bind("DELETE FROM t WHERE CURRENT OF cur1")?;
    let mut registry = InMemoryCursorRegistry::new();
    registry.open("cur1", vec![RowLocation(7)]);

    let err = Executor::new(&registry).execute(tree).unwrap_err();
    assert!(err.is_statement_local());
    assert!(matches!(
        err,
        SqlError::CursorResolution(CursorResolutionError::NotPositioned(_))
    ));
    Ok(())
}

#[test]
fn test_positioned_update_targets_the_current_row() -> SqlResult<()> {
    let tree = bind("UPDATE t SET x=1 WHERE CURRENT OF cur1")?;
    let mut registry = InMemoryCursorRegistry::new();
    registry.open("cur1", vec![RowLocation(7), RowLocation(8)]);
    registry.fetch_next("cur1")?;
    registry.fetch_next("cur1")?;

    let outcome = Executor::new(&registry).execute(tree)?;
    assert_eq!(outcome.statement_type, "UPDATE");
    assert_eq!(outcome.row_locations, vec![RowLocation(8)]);
    Ok(())
}

#[test]
fn test_optimized_plan_executes_and_original_survives() -> SqlResult<()> {
    let bound = bind("UPDATE t SET x=1 WHERE CURRENT OF cur1")?;
    let plan = bound.optimized()?;
    let mut registry = InMemoryCursorRegistry::new();
    registry.open("cur1", vec![RowLocation(1)]);
    registry.fetch_next("cur1")?;

    Executor::new(&registry).execute(plan)?;
    assert_eq!(bound.phase(), Phase::Bound);
    assert_eq!(CursorReferenceCollector::collect(bound.root())?.len(), 1);
    Ok(())
}

#[test]
fn test_unbound_tree_cannot_execute() -> SqlResult<()> {
    let statement: Statement = frontend::parse("UPDATE t SET x=1 WHERE CURRENT OF cur1")?.remove(0);
    let registry = InMemoryCursorRegistry::new();
    let result = Executor::new(&registry).execute(StatementTree::new(statement));
    assert!(matches!(
        result,
        Err(SqlError::IllegalTransition {
            from: Phase::Parsed,
            to: Phase::Executing
        })
    ));
    Ok(())
}

#[test]
fn test_bound_tree_dump_shows_cursor_reference() -> SqlResult<()> {
    let tree = bind("UPDATE t SET x=1 WHERE CURRENT OF cur1")?;
    let text = tree.render_as_text();
    assert!(text.starts_with("statementType: UPDATE\n"));
    assert!(text.contains("        PositionedCursorReference\n"), "{}", text);
    assert!(text.contains("        cursor: cur1"), "{}", text);
    assert!(text.contains("rowLocation"), "{}", text);
    assert!(tree.root().children().len() >= 3);
    Ok(())
}
