mod common;

use common::assert_copies_render_identically;
use proptest::prelude::*;
use sqlnode::ast::walk::{node_count, pre_order, trace_lines};
use sqlnode::ast::{
    BaseTable, DeleteStatement, Expression, FromTable, Literal, Node, PositionedCursorReference,
    PropertyBag, ResultColumn, SelectNode, SelectStatement, Statement, UpdateStatement,
    WhereClause,
};
use sqlnode::errors::StructuralError;
use sqlnode::pipeline::StatementTree;
use sqlnode::semantic::Binder;

fn name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,8}"
}

fn properties_strategy() -> impl Strategy<Value = PropertyBag> {
    prop::collection::btree_map(name_strategy(), name_strategy(), 0..4)
        .prop_map(|entries| entries.into_iter().collect())
}

fn literal_strategy() -> impl Strategy<Value = Literal> {
    prop_oneof![
        any::<i64>().prop_map(Literal::Integer),
        "[ -~]{0,10}".prop_map(Literal::String),
        Just(Literal::Null),
    ]
}

fn cursor_strategy() -> impl Strategy<Value = PositionedCursorReference> {
    (
        prop::option::of(name_strategy()),
        name_strategy(),
        prop::option::of(properties_strategy()),
    )
        .prop_map(|(alias, cursor, properties)| {
            PositionedCursorReference::build(alias, cursor, properties)
                .expect("generated cursor names are never blank")
        })
}

fn expression_strategy() -> impl Strategy<Value = Expression> {
    let leaf = prop_oneof![
        literal_strategy().prop_map(Expression::constant),
        name_strategy().prop_map(Expression::column),
        Just(Expression::row_location()),
    ];
    leaf.prop_recursive(4, 32, 2, |inner| {
        (inner.clone(), inner).prop_map(|(left, right)| Expression::equals(left, right))
    })
}

fn result_column_strategy() -> impl Strategy<Value = ResultColumn> {
    (prop::option::of(name_strategy()), expression_strategy(), 1usize..50)
        .prop_map(|(name, expression, line)| ResultColumn::at(name, expression, line))
}

fn base_table_strategy() -> impl Strategy<Value = BaseTable> {
    (
        name_strategy(),
        prop::option::of(name_strategy()),
        prop::option::of(properties_strategy()),
        1usize..50,
    )
        .prop_map(|(name, alias, properties, line)| {
            let mut table = BaseTable::at(name, line);
            table
                .initialize(alias, properties)
                .expect("fresh table initializes once");
            table
        })
}

fn where_strategy() -> impl Strategy<Value = Option<WhereClause>> {
    prop::option::of(prop_oneof![
        expression_strategy().prop_map(WhereClause::Searched),
        name_strategy().prop_map(WhereClause::CurrentOf),
    ])
}

fn statement_strategy() -> impl Strategy<Value = Statement> {
    let select = (
        prop::collection::vec(result_column_strategy(), 1..4),
        prop::collection::vec(base_table_strategy(), 1..3),
        prop::option::of(expression_strategy()),
        1usize..50,
    )
        .prop_map(|(columns, tables, predicate, line)| {
            let from_list = tables.into_iter().map(FromTable::from).collect();
            let query = SelectNode::new(columns, from_list, predicate).at(line);
            Statement::from(SelectStatement::new(query).at(line))
        });
    let update = (
        base_table_strategy(),
        prop::collection::vec(result_column_strategy(), 0..4),
        where_strategy(),
        1usize..50,
    )
        .prop_map(|(target, set, where_clause, line)| {
            Statement::from(UpdateStatement::new(target, set, where_clause).at(line))
        });
    let delete = (base_table_strategy(), where_strategy(), 1usize..50).prop_map(
        |(target, where_clause, line)| {
            Statement::from(DeleteStatement::new(target, where_clause).at(line))
        },
    );
    prop_oneof![select, update, delete]
}

fn update_strategy() -> impl Strategy<Value = Statement> {
    (
        name_strategy(),
        prop::option::of(name_strategy()),
        prop::collection::vec((name_strategy(), literal_strategy()), 0..5),
        prop::option::of(name_strategy()),
        1usize..50,
    )
        .prop_map(|(table, alias, assignments, cursor, line)| {
            let mut target = BaseTable::at(table, line);
            target
                .initialize(alias, None)
                .expect("fresh table initializes once");
            let set = assignments
                .into_iter()
                .map(|(column, value)| ResultColumn::new(Some(column), Expression::constant(value)))
                .collect();
            UpdateStatement::new(target, set, cursor.map(WhereClause::CurrentOf))
                .at(line)
                .into()
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn copied_cursor_reference_renders_like_source(source in cursor_strategy()) {
        let mut copy = PositionedCursorReference::new();
        copy.copy_structure_from(&source).unwrap();
        prop_assert_eq!(copy.render_as_text(), source.render_as_text());
    }

    #[test]
    fn copied_statement_renders_like_source(source in update_strategy()) {
        let mut copy: Statement =
            UpdateStatement::new(BaseTable::new("placeholder"), Vec::new(), None).into();
        copy.copy_structure_from(&source).unwrap();
        prop_assert_eq!(copy.render_as_text(), source.render_as_text());
    }

    #[test]
    fn renaming_a_copy_leaves_source_alone(source in cursor_strategy(), renamed in name_strategy()) {
        let original = source.cursor_name().to_string();
        let mut copy = source.clone();
        copy.rename_cursor(renamed.clone()).unwrap();
        prop_assert_eq!(source.cursor_name(), original.as_str());
        prop_assert_eq!(copy.cursor_name(), renamed.as_str());
    }

    #[test]
    fn blank_cursor_names_are_rejected(blank in "[ \t]{0,4}") {
        let result = PositionedCursorReference::build(None, blank, None);
        prop_assert_eq!(result.err(), Some(StructuralError::InvalidCursorName));
    }

    #[test]
    fn trace_length_is_linear_in_nodes(statement in update_strategy()) {
        let nodes = node_count(&statement);
        let lines = trace_lines(&statement).count();
        prop_assert!(lines >= 3 * nodes);
        prop_assert!(lines <= 5 * nodes);
    }

    #[test]
    fn every_parsed_node_copies_and_renders_like_source(statement in statement_strategy()) {
        assert_copies_render_identically(&statement).unwrap();
    }

    #[test]
    fn every_bound_node_copies_and_renders_like_source(statement in statement_strategy()) {
        let bound = Binder::new().bind(StatementTree::new(statement)).unwrap();
        assert_copies_render_identically(bound.root()).unwrap();
        let nested = pre_order(bound.root())
            .filter(|(depth, node)| *depth > 0 && node.kind().is_statement())
            .count();
        prop_assert_eq!(nested, 0);
    }
}
