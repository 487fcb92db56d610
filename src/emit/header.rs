//! Emits the solver's header file: the `initRow`/`solve` declarations inside
//! a `namespace polyjam { namespace <solver_name> { ... } }` block.

pub struct HeaderParams<'a> {
    pub solver_name: &'a str,
    pub parameters: &'a str,
    pub m1_type: &'a str,
    pub m2_type: &'a str,
    pub solution_type: &'a str,
}

pub fn render(params: &HeaderParams) -> String {
    let HeaderParams {
        solver_name,
        parameters,
        m1_type,
        m2_type,
        solution_type,
    } = *params;

    format!(
        "{license}\n\
         \n\
         //This code is automatically generated by polyjam for solving {solver_name}.\n\
         //It is licensed under the GNU GPL terms.\n\
         //Please contact the author of polyjam for proprietary use.\n\
         \n\
         #ifndef POLYJAM_{upper}_HPP_\n\
         #define POLYJAM_{upper}_HPP_\n\
         \n\
         #include <stdlib.h>\n\
         #include <Eigen/Eigen>\n\
         #include <vector>\n\
         #include <list>\n\
         \n\
         namespace polyjam\n\
         {{\n\
         namespace {solver_name}\n\
         {{\n\
         \n  void initRow(\n\
         \x20     {m2_type} & M2,\n\
         \x20     const {m1_type} & M1,\n\
         \x20     int row2,\n\
         \x20     int row1,\n\
         \x20     const int * cols2,\n\
         \x20     const int * cols1,\n\
         \x20     size_t numberCols );\n\
         \n  void solve( {parameters}, {solution_type} & solutions );\n\
         \n}}\n}}\n\
         \n#endif /* POLYJAM_{upper}_HPP_ */\n",
        license = super::GENERATED_LICENSE,
        upper = solver_name.to_uppercase(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_declares_init_row_and_solve() {
        let params = HeaderParams {
            solver_name: "p3p",
            parameters: "const Eigen::MatrixXd & points",
            m1_type: "Eigen::MatrixXd",
            m2_type: "Eigen::MatrixXd",
            solution_type: "std::vector<Eigen::Matrix<double,3,1>>",
        };
        let header = render(&params);
        assert!(header.contains("namespace p3p"));
        assert!(header.contains("void initRow("));
        assert!(header.contains("void solve( const Eigen::MatrixXd & points"));
    }
}
